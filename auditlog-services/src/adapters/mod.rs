pub mod base_adapter;
pub mod json_adapter;
pub mod table_adapter;

use crate::config::Settings;
use auditlog_core::NormalizedEvent;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

pub use base_adapter::BaseAdapter;
pub use json_adapter::JsonLinesRenderer;
pub use table_adapter::TableRenderer;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Unknown renderer: {0}")]
    UnknownRenderer(String),
}

/// Turns normalized events into text for a display surface.
pub trait EventRenderer: Send + Sync {
    fn name(&self) -> &str;

    fn render(&self, events: &[NormalizedEvent]) -> String;
}

#[derive(Default)]
pub struct RendererRegistry {
    renderers: HashMap<String, Arc<dyn EventRenderer>>,
}

impl RendererRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in `table` and `json` renderers.
    pub fn with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(TableRenderer::new(
            settings.time_format.clone(),
            settings.message_width,
        )));
        registry.register(Arc::new(JsonLinesRenderer));
        registry
    }

    pub fn register(&mut self, renderer: Arc<dyn EventRenderer>) {
        let name = renderer.name().to_lowercase();
        info!("Renderer registered: {}", name);
        self.renderers.insert(name, renderer);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn EventRenderer>, RenderError> {
        self.renderers
            .get(&name.to_lowercase())
            .cloned()
            .ok_or_else(|| RenderError::UnknownRenderer(name.to_string()))
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.renderers.keys().cloned().collect();
        names.sort();
        names
    }
}
