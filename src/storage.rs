//! Upload persistence.
//!
//! Every predict request writes its video beneath the configured upload root
//! before inference runs. Files are kept after the response is sent; nothing
//! here deletes them. The client-supplied filename is used verbatim, so two
//! uploads with the same name clobber each other.

use std::path::{Path, PathBuf};

/// Reject names that would escape the upload root. Anything else is used
/// as-is.
pub fn is_safe_filename(name: &str) -> bool {
    !name.is_empty()
        && !name.contains("..")
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

/// Write `data` under the upload root as `filename`, creating the root on
/// first use. Returns the path handed to the inference backend.
pub async fn save_upload(
    upload_root: &Path,
    filename: &str,
    data: &[u8],
) -> std::io::Result<PathBuf> {
    tokio::fs::create_dir_all(upload_root).await?;

    let path = upload_root.join(filename);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}
