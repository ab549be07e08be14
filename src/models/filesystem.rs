/// Raw counters returned by one statvfs(2) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RawStatfs {
    pub block_size:       u64,
    pub blocks:           u64,
    pub blocks_free:      u64,
    pub blocks_available: u64,   // free blocks usable by unprivileged users
    pub files:            u64,
    pub files_free:       u64,
}

/// Derived usage values for one mounted filesystem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilesystemStats {
    pub available_bytes: f64,
    pub free_bytes:      f64,
    pub size_bytes:      f64,
    pub total_inodes:    f64,
    pub free_inodes:     f64,
}

impl FilesystemStats {
    /// Products are computed in f64 so large block counts cannot overflow.
    pub fn from_raw(raw: &RawStatfs) -> Self {
        let bsize = raw.block_size as f64;
        Self {
            available_bytes: raw.blocks_available as f64 * bsize,
            free_bytes:      raw.blocks_free as f64 * bsize,
            size_bytes:      raw.blocks as f64 * bsize,
            total_inodes:    raw.files as f64,
            free_inodes:     raw.files_free as f64,
        }
    }
}
