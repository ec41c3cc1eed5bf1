//! Client-side checks before a file is sent.

use std::path::Path;

use crate::error::WorkflowError;

/// File extensions the service can parse.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["csv", "xlsx", "parquet"];

/// Reject empty files and unsupported formats before uploading.
///
/// # Errors
///
/// Returns [`WorkflowError::EmptyFile`] or [`WorkflowError::UnsupportedFormat`].
pub fn check_upload(filename: &str, len: usize) -> Result<(), WorkflowError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension {
        Some(ext) if SUPPORTED_EXTENSIONS.contains(&ext.as_str()) => {}
        _ => return Err(WorkflowError::UnsupportedFormat(filename.to_string())),
    }
    if len == 0 {
        return Err(WorkflowError::EmptyFile(filename.to_string()));
    }
    Ok(())
}
