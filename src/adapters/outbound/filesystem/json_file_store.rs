use crate::ports::outbound::ResultStore;
use crate::shared::error::ScanError;
use crate::shared::security::validate_not_symlink;
use crate::shared::Result;
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// JsonFileStore adapter - one pretty-printed JSON document per output file
///
/// Files are created with create-new semantics when reserved and written
/// exactly once. Existing files and symbolic links are never written to.
pub struct JsonFileStore {
    output_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl ResultStore for JsonFileStore {
    fn reserve(&self, file_name: &str) -> Result<PathBuf> {
        let path = self.path_for(file_name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(path),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(ScanError::OutputAlreadyExists {
                path,
                file_name: file_name.to_string(),
            }
            .into()),
            Err(e) => Err(ScanError::FileWriteError {
                path,
                details: e.to_string(),
            }
            .into()),
        }
    }

    fn path_for(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }

    fn persist(&self, path: &Path, document: &Value) -> Result<()> {
        validate_not_symlink(path, "Write")?;

        let metadata = fs::metadata(path).map_err(|e| ScanError::FileWriteError {
            path: path.to_path_buf(),
            details: format!("Output file was not reserved: {}", e),
        })?;
        if metadata.len() > 0 {
            return Err(ScanError::OutputAlreadyPopulated {
                path: path.to_path_buf(),
            }
            .into());
        }

        let json = serde_json::to_string_pretty(document)?;
        let mut file = OpenOptions::new()
            .write(true)
            .open(path)
            .map_err(|e| ScanError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        file.write_all(json.as_bytes())
            .map_err(|e| ScanError::FileWriteError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        Ok(())
    }
}
