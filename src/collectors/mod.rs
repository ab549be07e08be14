pub mod exclude;
pub mod filesystem;
pub mod mounts;
pub mod statfs;
