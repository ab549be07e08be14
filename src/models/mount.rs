/// One entry of the current mount table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mount {
    pub device:      String,   // "/dev/sda1", "tmpfs", "server:/export"
    pub mount_point: String,   // "/", "/home"
    pub fs_type:     String,   // "ext4", "nfs4"
}

impl Mount {
    pub fn new(device: impl Into<String>, mount_point: impl Into<String>, fs_type: impl Into<String>) -> Self {
        Self {
            device:      device.into(),
            mount_point: mount_point.into(),
            fs_type:     fs_type.into(),
        }
    }
}
