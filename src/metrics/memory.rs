use super::{Collector, MetricDesc, Registry, Reporter};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use tracing::warn;

/// One labeled value produced during a gather.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub name:   String,
    pub labels: BTreeMap<String, String>,
    pub value:  f64,
}

/// Registry that keeps nothing between gathers: every call to
/// [`MemoryRegistry::gather`] runs all collectors against an empty buffer.
#[derive(Default)]
pub struct MemoryRegistry {
    metrics:    Vec<MetricDesc>,
    collectors: Vec<Collector>,
}

impl MemoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn metrics(&self) -> &[MetricDesc] {
        &self.metrics
    }

    pub fn gather(&self) -> Vec<Sample> {
        let mut buf = SampleBuffer { known: &self.metrics, samples: Vec::new() };
        for collect in &self.collectors {
            collect(&mut buf);
        }
        buf.samples
    }
}

impl Registry for MemoryRegistry {
    fn register(&mut self, name: &str, label_names: &[&'static str]) -> MetricDesc {
        if let Some(existing) = self.metrics.iter().find(|m| m.name == name) {
            if existing.label_names != label_names {
                warn!("metric {} re-registered with different labels; keeping the first schema", name);
            }
            return existing.clone();
        }
        let desc = MetricDesc::new(name, label_names);
        self.metrics.push(desc.clone());
        desc
    }

    fn add_collector(&mut self, collector: Collector) {
        self.collectors.push(collector);
    }
}

struct SampleBuffer<'a> {
    known:   &'a [MetricDesc],
    samples: Vec<Sample>,
}

impl Reporter for SampleBuffer<'_> {
    fn update(&mut self, metric: &MetricDesc, value: f64, label_values: &[&str]) {
        if !self.known.contains(metric) {
            warn!("dropping sample for unregistered metric {}", metric.name);
            return;
        }
        if label_values.len() != metric.label_names.len() {
            warn!(
                "dropping sample for {}: {} label values for {} labels",
                metric.name,
                label_values.len(),
                metric.label_names.len()
            );
            return;
        }
        let labels = metric.label_names.iter()
            .zip(label_values)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.samples.push(Sample { name: metric.name.clone(), labels, value });
    }
}

/// Render samples as Prometheus-style text, one `name{labels} value` per line.
pub fn render_text(samples: &[Sample]) -> String {
    let mut out = String::new();
    for s in samples {
        out.push_str(&s.name);
        if !s.labels.is_empty() {
            out.push('{');
            for (i, (k, v)) in s.labels.iter().enumerate() {
                if i > 0 { out.push(','); }
                let _ = write!(out, "{}=\"{}\"", k, escape_label(v));
            }
            out.push('}');
        }
        let _ = writeln!(out, " {}", s.value);
    }
    out
}

fn escape_label(v: &str) -> String {
    let mut out = String::with_capacity(v.len());
    for c in v.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"'  => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            _    => out.push(c),
        }
    }
    out
}
