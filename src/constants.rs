//! Application constants

/// Maximum accepted size for a video upload (200 MB)
pub const MAX_UPLOAD_SIZE: usize = 200 * 1024 * 1024;

/// Default directory for persisted uploads
pub const DEFAULT_UPLOAD_DIR: &str = "./assets";

/// Default listen port
pub const DEFAULT_PORT: &str = "5000";
