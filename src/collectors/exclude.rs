//! Pseudo-filesystem detection.
//!
//! Matching is plain substring containment, so "nfs" also drops "nfs4" and
//! "fuse" also drops "fuse.sshfs". Over-exclusion is accepted; reporting a
//! pseudo filesystem is not. Regexes were considered but they are slower.

/// Device names that identify pseudo filesystems.
pub const EXCLUDED_DEVICES: &[&str] = &[
    "fusectl", "gvfsd-fuse", "lxcfs", "mqueue", "none", "rootfs",
    "sunrpc", "systemd", "udev",
];

/// Filesystem types that are virtual, in-memory or network backed.
pub const EXCLUDED_FS_TYPES: &[&str] = &[
    "aufs", "autofs", "binfmt_misc", "cifs", "cgroup", "debugfs", "devpts",
    "devtmpfs", "ecryptfs", "efivarfs", "fuse", "hugetlbfs", "mqueue", "nfs",
    "overlayfs", "proc", "pstore", "rpc_pipefs", "securityfs", "smb", "sysfs",
    "tmpfs", "tracefs",
];

/// Returns true if the mount should never be reported. Case-sensitive.
pub fn is_excluded(device: &str, fs_type: &str) -> bool {
    EXCLUDED_DEVICES.iter().any(|d| device.contains(d))
        || EXCLUDED_FS_TYPES.iter().any(|t| fs_type.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_device_wins_over_real_fs_type() {
        for dev in EXCLUDED_DEVICES {
            assert!(is_excluded(dev, "ext4"), "{} should be excluded", dev);
        }
    }

    #[test]
    fn test_excluded_fs_type_wins_over_real_device() {
        for fs in EXCLUDED_FS_TYPES {
            assert!(is_excluded("/dev/sda1", fs), "{} should be excluded", fs);
        }
    }

    #[test]
    fn test_real_block_devices_pass() {
        assert!(!is_excluded("/dev/sda1", "ext4"));
        assert!(!is_excluded("/dev/nvme0n1p2", "xfs"));
        assert!(!is_excluded("/dev/mapper/vg0-root", "btrfs"));
    }

    #[test]
    fn test_substring_not_equality() {
        assert!(is_excluded("mydev-lxcfs-backup", "ext4"));
        assert!(is_excluded("server:/export", "nfs4"));
        assert!(is_excluded("sshfs#host:", "fuse.sshfs"));
        assert!(is_excluded("cgroup2", "cgroup2"));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert!(!is_excluded("/dev/sdb1", "NTFS"));
        assert!(!is_excluded("UDEVX", "ext4"));
    }

    #[test]
    fn test_none_device_is_always_excluded() {
        assert!(is_excluded("none", "ext4"));
    }
}
