use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

/// In-process counters and histograms for the formatting pipeline.
pub struct SimpleMetrics {
    counters: Mutex<HashMap<String, i64>>,
    histograms: Mutex<HashMap<String, Vec<f64>>>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl SimpleMetrics {
    pub fn new() -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            histograms: Mutex::new(HashMap::new()),
        }
    }

    fn series_key(name: &str, labels: &[(&str, &str)]) -> String {
        let mut labels = labels.to_vec();
        labels.sort_unstable();
        let rendered = labels
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(",");
        if rendered.is_empty() {
            name.to_string()
        } else {
            format!("{name}{{{rendered}}}")
        }
    }

    pub fn increment(&self, name: &str, value: i64, labels: &[(&str, &str)]) {
        let key = Self::series_key(name, labels);
        *lock(&self.counters).entry(key).or_insert(0) += value;
    }

    pub fn counter(&self, name: &str, labels: &[(&str, &str)]) -> i64 {
        let key = Self::series_key(name, labels);
        lock(&self.counters).get(&key).copied().unwrap_or(0)
    }

    pub fn observe(&self, name: &str, value: f64, labels: &[(&str, &str)]) {
        let key = Self::series_key(name, labels);
        lock(&self.histograms).entry(key).or_default().push(value);
    }

    pub fn histogram(&self, name: &str, labels: &[(&str, &str)]) -> HistogramStats {
        let key = Self::series_key(name, labels);
        let mut samples = lock(&self.histograms).get(&key).cloned().unwrap_or_default();
        samples.sort_unstable_by(f64::total_cmp);
        HistogramStats::from_sorted(&samples)
    }
}

/// Snapshot of one histogram series. Every field is zero for an empty series.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HistogramStats {
    pub count: usize,
    pub sum: f64,
    pub avg: f64,
    pub p50: f64,
    pub p95: f64,
    pub p99: f64,
}

impl HistogramStats {
    fn from_sorted(samples: &[f64]) -> Self {
        let Some(last) = samples.len().checked_sub(1) else {
            return Self::default();
        };
        // nearest-rank on the sorted samples
        let quantile = |q: f64| samples[((samples.len() as f64 * q) as usize).min(last)];
        let sum: f64 = samples.iter().sum();
        Self {
            count: samples.len(),
            sum,
            avg: sum / samples.len() as f64,
            p50: quantile(0.50),
            p95: quantile(0.95),
            p99: quantile(0.99),
        }
    }
}

impl Default for SimpleMetrics {
    fn default() -> Self {
        Self::new()
    }
}

lazy_static! {
    pub static ref GLOBAL_METRICS: SimpleMetrics = SimpleMetrics::new();
}

/// Records elapsed wall time into a histogram when stopped.
pub struct Timer<'a> {
    metrics: &'a SimpleMetrics,
    name: String,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn start(metrics: &'a SimpleMetrics, name: &str) -> Self {
        Self {
            metrics,
            name: name.to_string(),
            start: Instant::now(),
        }
    }

    pub fn stop(self, labels: &[(&str, &str)]) -> f64 {
        let duration = self.start.elapsed().as_secs_f64();
        self.metrics.observe(&self.name, duration, labels);
        duration
    }
}

pub struct MetricNames;

impl MetricNames {
    pub const EVENTS_FORMATTED: &'static str = "audit_events_formatted";
    pub const EVENTS_UNKNOWN: &'static str = "audit_events_unknown";
    pub const RENDER_DURATION: &'static str = "audit_render_duration_seconds";
}
