use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// Individual crawl, impersonation and credential failures never change the
/// exit code; they are reported through the log stream only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// The traversal ran to completion
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Fatal error before the traversal could start (config file, output directory, ...)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the scanner.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// keeping user-facing messages next to the variant they describe.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Failed to read scan config: {path}\nDetails: {details}\n\n💡 Hint: Check that the file exists and is readable")]
    ConfigReadError { path: PathBuf, details: String },

    #[error("Failed to parse scan config: {path}\nDetails: {details}\n\n💡 Hint: The scan config must be a JSON object keyed by resource type, e.g. {{\"compute_instances\": {{\"fetch\": true}}}}")]
    ConfigParseError { path: PathBuf, details: String },

    #[error("Invalid output directory: {path}\nReason: {reason}\n\n💡 Hint: Create the directory first or pass an existing one with --output-dir")]
    InvalidOutputDirectory { path: PathBuf, reason: String },

    #[error("Output file already exists: {path}\n\n💡 Hint: Try removing the {file_name} file and restart the scanner")]
    OutputAlreadyExists { path: PathBuf, file_name: String },

    #[error("Output file already holds results: {path}\n\n💡 Hint: Results are written once per project and scan; start a new scan instead")]
    OutputAlreadyPopulated { path: PathBuf },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },

    #[error("Unsupported service family: {family}")]
    UnsupportedServiceFamily { family: String },

    #[error("Unsupported resource type: {resource_type}")]
    UnsupportedResourceType { resource_type: String },

    #[error("Failed to retrieve credentials from {source_name}: {details}")]
    CredentialError {
        source_name: String,
        details: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::InvalidArguments.as_i32(), 2);
        assert_eq!(ExitCode::ApplicationError.as_i32(), 3);
    }

    #[test]
    fn test_exit_code_display() {
        assert_eq!(format!("{}", ExitCode::Success), "Success (0)");
        assert_eq!(
            format!("{}", ExitCode::InvalidArguments),
            "Invalid Arguments (2)"
        );
        assert_eq!(
            format!("{}", ExitCode::ApplicationError),
            "Application Error (3)"
        );
    }

    #[test]
    fn test_config_parse_error_display() {
        let error = ScanError::ConfigParseError {
            path: PathBuf::from("/tmp/scan.json"),
            details: "expected value at line 1 column 1".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Failed to parse scan config"));
        assert!(display.contains("/tmp/scan.json"));
        assert!(display.contains("expected value"));
        assert!(display.contains("{\"compute_instances\""));
        assert!(display.contains("💡 Hint:"));
    }

    #[test]
    fn test_output_already_exists_display() {
        let error = ScanError::OutputAlreadyExists {
            path: PathBuf::from("/out/proj-1-2024-01-01_00-00-00.json"),
            file_name: "proj-1-2024-01-01_00-00-00.json".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Output file already exists"));
        assert!(display.contains("Try removing the proj-1-2024-01-01_00-00-00.json file"));
    }

    #[test]
    fn test_unsupported_variants_display() {
        let family = ScanError::UnsupportedServiceFamily {
            family: "mainframe".to_string(),
        };
        assert_eq!(format!("{}", family), "Unsupported service family: mainframe");

        let resource = ScanError::UnsupportedResourceType {
            resource_type: "floppy_disks".to_string(),
        };
        assert_eq!(
            format!("{}", resource),
            "Unsupported resource type: floppy_disks"
        );
    }

    #[test]
    fn test_security_error_display() {
        let error = ScanError::SecurityError {
            path: PathBuf::from("/test/symlink"),
            reason: "Symbolic links are not allowed".to_string(),
            hint: "Use a regular file instead".to_string(),
        };
        let display = format!("{}", error);
        assert!(display.contains("Security violation"));
        assert!(display.contains("/test/symlink"));
        assert!(display.contains("Use a regular file instead"));
    }
}
