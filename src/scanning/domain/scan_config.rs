use crate::scanning::policies::{SchemaRegistry, SERVICE_ACCOUNTS};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// Per-resource-type settings from the scan configuration file
///
/// `fetch` decides whether the type is crawled; `impersonate` is only
/// meaningful on the `service_accounts` entry. Any other keys are passed to
/// the crawler verbatim.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ResourceSettings {
    #[serde(default)]
    pub fetch: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impersonate: Option<bool>,
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl ResourceSettings {
    pub fn fetch(fetch: bool) -> Self {
        Self {
            fetch,
            ..Self::default()
        }
    }
}

/// Options handed to a single crawler invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlerConfig {
    pub options: Map<String, Value>,
    /// Companion file for storage object listings
    pub gcs_output_path: Option<PathBuf>,
}

impl CrawlerConfig {
    /// Boolean option, false when absent or not a boolean
    pub fn flag(&self, key: &str) -> bool {
        self.options
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// Which resource types to crawl and whether to chase impersonation edges
///
/// Without a configuration file everything is fetched and nothing is
/// impersonated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanConfig {
    entries: Option<IndexMap<String, ResourceSettings>>,
}

impl ScanConfig {
    /// Configuration used when no file is given: fetch everything, never impersonate
    pub fn fetch_everything() -> Self {
        Self { entries: None }
    }

    pub fn from_entries(entries: IndexMap<String, ResourceSettings>) -> Self {
        Self {
            entries: Some(entries),
        }
    }

    /// Whether a resource type is crawled
    ///
    /// A type missing from the file is fetched; a type listed in the file is
    /// fetched only when its `fetch` flag is true.
    pub fn is_set(&self, resource_type: &str) -> bool {
        match &self.entries {
            None => true,
            Some(entries) => entries
                .get(resource_type)
                .map(|settings| settings.fetch)
                .unwrap_or(true),
        }
    }

    /// Whether impersonation of discovered service accounts is enabled
    pub fn impersonation_enabled(&self) -> bool {
        self.entries
            .as_ref()
            .and_then(|entries| entries.get(SERVICE_ACCOUNTS))
            .and_then(|settings| settings.impersonate)
            .unwrap_or(false)
    }

    /// Enabled resource types in crawl order
    pub fn enabled_resource_types(&self) -> Vec<&'static str> {
        SchemaRegistry::crawl_order()
            .filter(|resource_type| self.is_set(resource_type))
            .collect()
    }

    /// Builds the options passed to one crawler invocation
    pub fn crawler_config(
        &self,
        resource_type: &str,
        gcs_output_path: Option<PathBuf>,
    ) -> CrawlerConfig {
        let options = self
            .entries
            .as_ref()
            .and_then(|entries| entries.get(resource_type))
            .map(|settings| settings.options.clone())
            .unwrap_or_default();
        CrawlerConfig {
            options,
            gcs_output_path,
        }
    }

    /// Keys of the configuration that name no known resource type
    pub fn unknown_keys(&self) -> Vec<&str> {
        self.entries
            .iter()
            .flat_map(|entries| entries.keys())
            .filter(|key| !SchemaRegistry::is_known_resource_type(key))
            .map(String::as_str)
            .collect()
    }

    /// A configuration listing every resource type with `fetch: true`
    pub fn template() -> IndexMap<String, ResourceSettings> {
        SchemaRegistry::crawl_order()
            .map(|resource_type| {
                let mut settings = ResourceSettings::fetch(true);
                if resource_type == SERVICE_ACCOUNTS {
                    settings.impersonate = Some(false);
                }
                (resource_type.to_string(), settings)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanning::policies::{GKE_IMAGES, IAM_POLICY};
    use serde_json::json;

    fn parse(value: Value) -> ScanConfig {
        ScanConfig::from_entries(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_fetch_everything_defaults() {
        let config = ScanConfig::fetch_everything();
        assert!(config.is_set("compute_instances"));
        assert!(config.is_set(GKE_IMAGES));
        assert!(!config.impersonation_enabled());
        assert_eq!(
            config.enabled_resource_types().len(),
            SchemaRegistry::crawl_order().count()
        );
    }

    #[test]
    fn test_is_set_with_file() {
        let config = parse(json!({
            "compute_instances": {"fetch": true},
            "kms": {"fetch": false},
            "bq": {},
        }));
        assert!(config.is_set("compute_instances"));
        assert!(!config.is_set("kms"));
        assert!(!config.is_set("bq"));
        // Absent key falls back to fetching
        assert!(config.is_set("subnets"));
    }

    #[test]
    fn test_impersonation_flag() {
        let disabled = parse(json!({"service_accounts": {"fetch": true}}));
        assert!(!disabled.impersonation_enabled());

        let enabled = parse(json!({"service_accounts": {"fetch": false, "impersonate": true}}));
        assert!(enabled.impersonation_enabled());
        assert!(!enabled.is_set("service_accounts"));
    }

    #[test]
    fn test_enabled_resource_types_keep_crawl_order() {
        let mut entries: IndexMap<String, ResourceSettings> = SchemaRegistry::crawl_order()
            .map(|name| (name.to_string(), ResourceSettings::fetch(false)))
            .collect();
        entries.insert("subnets".to_string(), ResourceSettings::fetch(true));
        entries.insert(IAM_POLICY.to_string(), ResourceSettings::fetch(true));

        let config = ScanConfig::from_entries(entries);
        assert_eq!(config.enabled_resource_types(), vec![IAM_POLICY, "subnets"]);
    }

    #[test]
    fn test_crawler_config_carries_options() {
        let config = parse(json!({
            "storage_buckets": {"fetch": true, "fetch_file_names": true},
        }));
        let crawler_config =
            config.crawler_config("storage_buckets", Some(PathBuf::from("/out/gcs-p.json")));

        assert!(crawler_config.flag("fetch_file_names"));
        assert!(!crawler_config.flag("missing"));
        assert!(!crawler_config.options.contains_key("fetch"));
        assert_eq!(
            crawler_config.gcs_output_path,
            Some(PathBuf::from("/out/gcs-p.json"))
        );
    }

    #[test]
    fn test_unknown_keys() {
        let config = parse(json!({
            "compute_instances": {"fetch": true},
            "floppy_disks": {"fetch": true},
        }));
        assert_eq!(config.unknown_keys(), vec!["floppy_disks"]);
        assert!(ScanConfig::fetch_everything().unknown_keys().is_empty());
    }

    #[test]
    fn test_template_round_trips_through_json() {
        let template = ScanConfig::template();
        let text = serde_json::to_string(&template).unwrap();
        let config = ScanConfig::from_entries(serde_json::from_str(&text).unwrap());

        assert!(config.is_set("compute_instances"));
        assert!(!config.impersonation_enabled());
        assert_eq!(template[SERVICE_ACCOUNTS].impersonate, Some(false));
    }
}
