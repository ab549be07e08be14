use super::{MetricDesc, Reporter, SampleFilter};

/// Metric-name allow/deny lists.
///
/// Patterns ending in `*` match by prefix, anything else must match exactly.
/// An empty `include` list keeps every metric not named by `exclude`.
#[derive(Debug, Clone, Default)]
pub struct Filters {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

impl Filters {
    pub fn new(include: Vec<String>, exclude: Vec<String>) -> Self {
        Self { include, exclude }
    }

    pub fn is_included(&self, name: &str) -> bool {
        let included = self.include.is_empty() || self.include.iter().any(|p| matches(p, name));
        included && !self.exclude.iter().any(|p| matches(p, name))
    }
}

fn matches(pattern: &str, name: &str) -> bool {
    if let Some(prefix) = pattern.strip_suffix('*') { name.starts_with(prefix) }
    else { pattern == name }
}

impl SampleFilter for Filters {
    fn update_if_included(
        &self,
        reporter: &mut dyn Reporter,
        metric: &MetricDesc,
        value: f64,
        label_values: &[&str],
    ) -> bool {
        if !self.is_included(&metric.name) {
            return false;
        }
        reporter.update(metric, value, label_values);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Count(usize);

    impl Reporter for Count {
        fn update(&mut self, _metric: &MetricDesc, _value: f64, _label_values: &[&str]) {
            self.0 += 1;
        }
    }

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_filters_keep_everything() {
        let f = Filters::default();
        assert!(f.is_included("filesystem_avail"));
        assert!(f.is_included("anything"));
    }

    #[test]
    fn test_exclude_exact_and_prefix() {
        let f = Filters::new(vec![], strings(&["filesystem_size", "filesystem_files*"]));
        assert!(!f.is_included("filesystem_size"));
        assert!(!f.is_included("filesystem_files"));
        assert!(!f.is_included("filesystem_files_free"));
        assert!(f.is_included("filesystem_free"));
        // exact patterns are not prefixes
        assert!(f.is_included("filesystem_size_total"));
    }

    #[test]
    fn test_include_restricts_and_exclude_wins() {
        let f = Filters::new(strings(&["filesystem_*"]), strings(&["filesystem_free"]));
        assert!(f.is_included("filesystem_avail"));
        assert!(!f.is_included("filesystem_free"));
        assert!(!f.is_included("cpu_seconds"));
    }

    #[test]
    fn test_update_if_included_forwards_only_kept_samples() {
        let f = Filters::new(vec![], strings(&["filesystem_size"]));
        let mut sink = Count(0);
        let kept = MetricDesc::new("filesystem_avail", &["device"]);
        let vetoed = MetricDesc::new("filesystem_size", &["device"]);

        assert!(f.update_if_included(&mut sink, &kept, 1.0, &["/dev/sda1"]));
        assert!(!f.update_if_included(&mut sink, &vetoed, 1.0, &["/dev/sda1"]));
        assert_eq!(sink.0, 1);
    }
}
