//! Filesystem capacity and inode metrics.
//!
//! One collection pass lists the mounts, drops pseudo filesystems, runs
//! statvfs on each survivor and offers five samples per mount to the sample
//! filter. Failures are absorbed at the smallest scope that contains them:
//! a mount-table error aborts the tick, a statvfs error skips one mount, and
//! a filter veto skips one sample.

use crate::collectors::exclude::is_excluded;
use crate::collectors::statfs::{NixStatFs, StatFs};
use crate::metrics::{MetricDesc, Registry, Reporter, SampleFilter};
use crate::models::filesystem::FilesystemStats;
use crate::models::mount::Mount;
use std::io;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

const FS_SYSTEM: &str = "filesystem";
const LABELS: &[&str] = &["device", "mountpoint", "fstype"];

/// Lists the current mount table.
pub type MountSource = Box<dyn Fn() -> io::Result<Vec<Mount>> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureScope {
    Tick,
    Mount,
}

#[derive(Debug, Error)]
pub enum CollectError {
    #[error("could not read mount table: {0}")]
    MountTable(#[source] io::Error),

    #[error("statfs failed on {mount_point}: {source}")]
    Statfs {
        mount_point: String,
        #[source]
        source: io::Error,
    },
}

impl CollectError {
    pub fn scope(&self) -> FailureScope {
        match self {
            CollectError::MountTable(_)  => FailureScope::Tick,
            CollectError::Statfs { .. } => FailureScope::Mount,
        }
    }
}

/// What happened to one mount during a tick.
#[derive(Debug)]
pub enum MountOutcome {
    Excluded,
    Failed(CollectError),
    Reported { offered: usize, vetoed: usize },
}

#[derive(Debug)]
pub enum TickOutcome {
    Completed,
    Aborted(CollectError),
}

/// Result of one collection pass, in mount-table order.
#[derive(Debug)]
pub struct TickReport {
    pub outcome: TickOutcome,
    pub mounts:  Vec<(Mount, MountOutcome)>,
}

impl TickReport {
    pub fn excluded(&self) -> usize {
        self.mounts.iter().filter(|(_, o)| matches!(o, MountOutcome::Excluded)).count()
    }

    pub fn failed(&self) -> usize {
        self.errors().filter(|e| e.scope() == FailureScope::Mount).count()
    }

    /// The tick-level error, if any, followed by per-mount errors.
    pub fn errors(&self) -> impl Iterator<Item = &CollectError> {
        let tick = match &self.outcome {
            TickOutcome::Aborted(e) => Some(e),
            TickOutcome::Completed => None,
        };
        tick.into_iter().chain(self.mounts.iter().filter_map(|(_, o)| match o {
            MountOutcome::Failed(e) => Some(e),
            _ => None,
        }))
    }

    /// Samples that passed the filter and reached the reporter.
    pub fn emitted(&self) -> usize {
        self.mounts.iter().map(|(_, o)| match o {
            MountOutcome::Reported { offered, vetoed } => offered - vetoed,
            _ => 0,
        }).sum()
    }
}

/// The five metric identities, created once at registration.
#[derive(Debug, Clone)]
pub struct FsMetrics {
    pub available:  MetricDesc,
    pub files:      MetricDesc,
    pub files_free: MetricDesc,
    pub free:       MetricDesc,
    pub size:       MetricDesc,
}

impl FsMetrics {
    pub fn register(r: &mut dyn Registry) -> Self {
        Self {
            available:  r.register(&format!("{}_avail", FS_SYSTEM), LABELS),
            files:      r.register(&format!("{}_files", FS_SYSTEM), LABELS),
            files_free: r.register(&format!("{}_files_free", FS_SYSTEM), LABELS),
            free:       r.register(&format!("{}_free", FS_SYSTEM), LABELS),
            size:       r.register(&format!("{}_size", FS_SYSTEM), LABELS),
        }
    }
}

pub struct FilesystemCollector {
    metrics: FsMetrics,
    source:  MountSource,
    statfs:  Box<dyn StatFs>,
    filter:  Arc<dyn SampleFilter>,
}

impl FilesystemCollector {
    pub fn new<M>(
        metrics: FsMetrics,
        source: M,
        statfs: impl StatFs + 'static,
        filter: Arc<dyn SampleFilter>,
    ) -> Self
    where
        M: Fn() -> io::Result<Vec<Mount>> + Send + Sync + 'static,
    {
        Self { metrics, source: Box::new(source), statfs: Box::new(statfs), filter }
    }

    /// Run one collection pass. Never fails; see [`TickReport`] for what was skipped.
    pub fn collect(&self, reporter: &mut dyn Reporter) -> TickReport {
        let mounts = match (self.source)() {
            Ok(m) => m,
            Err(e) => {
                let err = CollectError::MountTable(e);
                debug!(scope = ?err.scope(), "Could not gather filesystem metrics: {}", err);
                return TickReport { outcome: TickOutcome::Aborted(err), mounts: Vec::new() };
            }
        };

        let mut out = Vec::with_capacity(mounts.len());
        for mount in mounts {
            let outcome = self.collect_mount(&mount, reporter);
            out.push((mount, outcome));
        }
        TickReport { outcome: TickOutcome::Completed, mounts: out }
    }

    fn collect_mount(&self, mount: &Mount, reporter: &mut dyn Reporter) -> MountOutcome {
        if is_excluded(&mount.device, &mount.fs_type) {
            debug!("Ignoring filesystem for device: {} {}", mount.device, mount.fs_type);
            return MountOutcome::Excluded;
        }

        let raw = match self.statfs.statfs(Path::new(&mount.mount_point)) {
            Ok(raw) => raw,
            Err(source) => {
                let err = CollectError::Statfs { mount_point: mount.mount_point.clone(), source };
                debug!(scope = ?err.scope(), "{}", err);
                return MountOutcome::Failed(err);
            }
        };

        let stats = FilesystemStats::from_raw(&raw);
        let labels = [mount.device.as_str(), mount.mount_point.as_str(), mount.fs_type.as_str()];
        let m = &self.metrics;
        let samples = [
            (&m.available,  stats.available_bytes),
            (&m.files,      stats.total_inodes),
            (&m.files_free, stats.free_inodes),
            (&m.free,       stats.free_bytes),
            (&m.size,       stats.size_bytes),
        ];

        let mut vetoed = 0;
        for (metric, value) in samples {
            if !self.filter.update_if_included(reporter, metric, value, &labels) {
                vetoed += 1;
            }
        }
        MountOutcome::Reported { offered: samples.len(), vetoed }
    }
}

/// Register the filesystem metrics and install a collector that queries
/// statvfs(2) for every mount returned by `source`.
pub fn register_fs_metrics<M>(r: &mut dyn Registry, source: M, filter: Arc<dyn SampleFilter>)
where
    M: Fn() -> io::Result<Vec<Mount>> + Send + Sync + 'static,
{
    register_fs_metrics_with(r, source, NixStatFs, filter);
}

pub fn register_fs_metrics_with<M>(
    r: &mut dyn Registry,
    source: M,
    statfs: impl StatFs + 'static,
    filter: Arc<dyn SampleFilter>,
)
where
    M: Fn() -> io::Result<Vec<Mount>> + Send + Sync + 'static,
{
    let metrics = FsMetrics::register(r);
    let collector = FilesystemCollector::new(metrics, source, statfs, filter);
    r.add_collector(Box::new(move |reporter: &mut dyn Reporter| {
        let report = collector.collect(reporter);
        debug!(
            outcome  = ?report.outcome,
            mounts   = report.mounts.len(),
            excluded = report.excluded(),
            failed   = report.failed(),
            emitted  = report.emitted(),
            "filesystem tick done"
        );
    }));
}
