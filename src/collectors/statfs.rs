//! Access to per-mount filesystem statistics.
//!
//! The `StatFs` trait lets the collector run against the real statvfs(2) call
//! or a fake in tests.

use crate::models::filesystem::RawStatfs;
use std::io;
use std::path::Path;

/// Query block and inode counters for a mounted filesystem.
///
/// Implementations block for as long as the underlying call does; an
/// unresponsive network mount stalls the caller.
pub trait StatFs: Send + Sync {
    fn statfs(&self, mount_point: &Path) -> io::Result<RawStatfs>;
}

/// statvfs(2) through `nix`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NixStatFs;

impl StatFs for NixStatFs {
    fn statfs(&self, mount_point: &Path) -> io::Result<RawStatfs> {
        use nix::sys::statvfs::statvfs;
        let stat = statvfs(mount_point).map_err(io::Error::from)?;

        // Counts are in units of f_frsize, not f_bsize.
        Ok(RawStatfs {
            block_size:       stat.fragment_size() as u64,
            blocks:           stat.blocks() as u64,
            blocks_free:      stat.blocks_free() as u64,
            blocks_available: stat.blocks_available() as u64,
            files:            stat.files() as u64,
            files_free:       stat.files_free() as u64,
        })
    }
}
