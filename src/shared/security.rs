use crate::shared::error::ScanError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum size for credential and configuration files (10 MB)
/// Key files, token files and scan configs are all tiny; anything larger is rejected
pub const MAX_INPUT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validates that a path is not a symbolic link
///
/// # Security
/// This function uses `symlink_metadata()` instead of `metadata()` to ensure
/// we check the symlink itself, not the target it points to.
///
/// # Arguments
/// * `path` - The path to validate
/// * `operation` - Description of the operation (e.g., "read", "write") for error messages
pub fn validate_not_symlink(path: &Path, operation: &str) -> Result<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| ScanError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read metadata for {} operation: {}", operation, e),
    })?;

    if metadata.is_symlink() {
        return Err(ScanError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} operations on symbolic links are not allowed",
                operation
            ),
            hint: "Point the scanner at the real file instead of a link".to_string(),
        }
        .into());
    }

    Ok(())
}

/// Reads a small input file (credential, token or config) as UTF-8 text
///
/// Rejects symlinks, non-regular files and files above [`MAX_INPUT_FILE_SIZE`].
///
/// # Arguments
/// * `path` - File to read
/// * `file_description` - Human readable kind of file for error messages (e.g. "key file")
pub fn read_input_file(path: &Path, file_description: &str) -> Result<String> {
    validate_not_symlink(path, "read")?;

    let metadata = fs::metadata(path).map_err(|e| ScanError::FileReadError {
        path: path.to_path_buf(),
        details: format!("Failed to read {} metadata: {}", file_description, e),
    })?;

    if !metadata.is_file() {
        return Err(ScanError::FileReadError {
            path: path.to_path_buf(),
            details: format!("{} is not a regular file", file_description),
        }
        .into());
    }

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(ScanError::SecurityError {
            path: path.to_path_buf(),
            reason: format!(
                "{} is too large ({} bytes). Maximum allowed size is {} bytes",
                file_description,
                metadata.len(),
                MAX_INPUT_FILE_SIZE
            ),
            hint: "Make sure the path points to the intended file".to_string(),
        }
        .into());
    }

    fs::read_to_string(path).map_err(|e| {
        ScanError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        }
        .into()
    })
}

/// Validates the directory results are written into
///
/// The directory must exist, must not be a symbolic link and must be a directory.
pub fn validate_output_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(ScanError::InvalidOutputDirectory {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    let metadata = fs::symlink_metadata(path).map_err(|e| ScanError::InvalidOutputDirectory {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(ScanError::InvalidOutputDirectory {
            path: path.to_path_buf(),
            reason: "Security: Output path is a symbolic link".to_string(),
        }
        .into());
    }

    if !path.is_dir() {
        return Err(ScanError::InvalidOutputDirectory {
            path: path.to_path_buf(),
            reason: "Not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
