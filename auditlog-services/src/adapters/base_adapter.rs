use super::{EventRenderer, RenderError, RendererRegistry};
use crate::config::Settings;
use auditlog_core::metrics::{MetricNames, Timer, GLOBAL_METRICS};
use auditlog_core::NormalizedEvent;
use std::sync::Arc;
use tracing::info;

/// Applies settings and metrics around a renderer.
pub struct BaseAdapter {
    pub settings: Settings,
    renderer: Arc<dyn EventRenderer>,
}

impl BaseAdapter {
    pub fn new(settings: Settings, renderer: Arc<dyn EventRenderer>) -> Self {
        Self { settings, renderer }
    }

    /// Picks the renderer named by `settings.output_format`.
    pub fn from_registry(settings: Settings, registry: &RendererRegistry) -> Result<Self, RenderError> {
        let renderer = registry.get(&settings.output_format)?;
        Ok(Self::new(settings, renderer))
    }

    pub fn renderer_name(&self) -> &str {
        self.renderer.name()
    }

    pub fn render(&self, mut events: Vec<NormalizedEvent>) -> String {
        let timer = Timer::start(&GLOBAL_METRICS, MetricNames::RENDER_DURATION);
        let total = events.len();
        if self.settings.skip_unknown {
            events.retain(|e| !e.is_unknown());
        }

        let out = self.renderer.render(&events);
        let duration = timer.stop(&[("renderer", self.renderer.name())]);
        info!(
            renderer = self.renderer.name(),
            rendered = events.len(),
            skipped = total - events.len(),
            duration_ms = duration * 1000.0,
            "Rendered audit events"
        );
        out
    }
}
