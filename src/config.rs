//! Scan configuration file support.
//!
//! The configuration is a JSON object keyed by resource type, for example
//! `{"compute_instances": {"fetch": true}, "service_accounts": {"fetch": true, "impersonate": true}}`.

use crate::scanning::domain::{ResourceSettings, ScanConfig};
use crate::shared::error::ScanError;
use crate::shared::security::read_input_file;
use crate::shared::Result;
use indexmap::IndexMap;
use std::path::Path;

/// Loads and validates a scan configuration file.
///
/// Symlinks and oversized files are refused like any other input file.
/// Unknown resource types are reported as warnings and otherwise ignored.
pub fn load_scan_config(path: &Path) -> Result<ScanConfig> {
    let content =
        read_input_file(path, "scan config").map_err(|e| ScanError::ConfigReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
    let config = parse_scan_config(path, &content)?;

    for key in config.unknown_keys() {
        tracing::warn!(
            key,
            path = %path.display(),
            "Unknown resource type in scan config will be ignored"
        );
    }
    Ok(config)
}

/// Parses configuration content; `path` is only used in error messages.
pub fn parse_scan_config(path: &Path, content: &str) -> Result<ScanConfig> {
    let entries: IndexMap<String, ResourceSettings> =
        serde_json::from_str(content).map_err(|e| ScanError::ConfigParseError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
    Ok(ScanConfig::from_entries(entries))
}

/// Sample configuration enabling every resource type, printed by `--print-default-config`.
pub fn default_config_json() -> Result<String> {
    Ok(serde_json::to_string_pretty(&ScanConfig::template())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanning::policies::SchemaRegistry;
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_scan_config() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("scan.json");
        fs::write(
            &path,
            r#"{
                "compute_instances": {"fetch": true},
                "bq": {"fetch": false},
                "storage_buckets": {"fetch": true, "fetch_file_names": true},
                "service_accounts": {"fetch": true, "impersonate": true}
            }"#,
        )
        .unwrap();

        let config = load_scan_config(&path).unwrap();
        assert!(config.is_set("compute_instances"));
        assert!(!config.is_set("bq"));
        assert!(config.is_set("kms"));
        assert!(config.impersonation_enabled());
        assert!(config.crawler_config("storage_buckets", None).flag("fetch_file_names"));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_scan_config(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::ConfigReadError { .. })
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_load_rejects_symlinked_config() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        fs::write(&target, r#"{"bq": {"fetch": false}}"#).unwrap();
        let link = temp_dir.path().join("scan.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let err = load_scan_config(&link).unwrap_err();
        match err.downcast_ref::<ScanError>() {
            Some(ScanError::ConfigReadError { details, .. }) => {
                assert!(details.contains("symbolic links"), "{}", details)
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_load_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_scan_config(temp_dir.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ScanError>(),
            Some(ScanError::ConfigReadError { .. })
        ));
    }

    #[test]
    fn test_parse_malformed_config() {
        for content in ["not json", "[1, 2]", r#"{"bq": true}"#, r#"{"bq": {"fetch": "yes"}}"#] {
            let err = parse_scan_config(Path::new("scan.json"), content).unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<ScanError>(),
                    Some(ScanError::ConfigParseError { .. })
                ),
                "accepted {}",
                content
            );
        }
    }

    #[test]
    fn test_unknown_keys_are_kept_out_of_crawling() {
        let config =
            parse_scan_config(Path::new("scan.json"), r#"{"mainframes": {"fetch": true}}"#)
                .unwrap();
        assert_eq!(config.unknown_keys(), vec!["mainframes"]);
        assert!(!config.enabled_resource_types().contains(&"mainframes"));
    }

    #[test]
    fn test_default_config_round_trips() {
        let json = default_config_json().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["service_accounts"]["impersonate"], false);
        assert_eq!(value["compute_instances"]["fetch"], true);

        let config = parse_scan_config(Path::new("default.json"), &json).unwrap();
        assert_eq!(
            config.enabled_resource_types().len(),
            SchemaRegistry::crawl_order().count()
        );
        assert!(!config.impersonation_enabled());
    }
}
