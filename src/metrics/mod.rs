//! Seams between collectors and the metrics backend.
//!
//! A collector registers its metric identities once, installs a callback, and
//! from then on only talks to a [`Reporter`] handed to it on every tick.

pub mod filters;
pub mod memory;

pub use filters::Filters;
pub use memory::{render_text, MemoryRegistry};

/// Identity of one registered metric: its name and label schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricDesc {
    pub name:        String,
    pub label_names: Vec<&'static str>,
}

impl MetricDesc {
    pub fn new(name: impl Into<String>, label_names: &[&'static str]) -> Self {
        Self { name: name.into(), label_names: label_names.to_vec() }
    }
}

/// Callback run by the registry once per collection tick.
pub type Collector = Box<dyn Fn(&mut dyn Reporter) + Send + Sync>;

pub trait Registry {
    fn register(&mut self, name: &str, label_names: &[&'static str]) -> MetricDesc;

    fn add_collector(&mut self, collector: Collector);
}

/// Sink for the samples of a single tick.
pub trait Reporter {
    fn update(&mut self, metric: &MetricDesc, value: f64, label_values: &[&str]);
}

/// Per-sample inclusion policy applied between a collector and its reporter.
pub trait SampleFilter: Send + Sync {
    /// Forwards the sample to `reporter` if the policy keeps it. Returns
    /// whether it was forwarded.
    fn update_if_included(
        &self,
        reporter: &mut dyn Reporter,
        metric: &MetricDesc,
        value: f64,
        label_values: &[&str],
    ) -> bool;
}
