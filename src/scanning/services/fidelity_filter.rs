use crate::scanning::domain::ProjectRecord;
use crate::scanning::policies::SchemaRegistry;
use serde_json::{Map, Value};

/// Applies the reduced (light) schema to crawl results
pub struct FidelityFilter;

impl FidelityFilter {
    /// Reduces every resource list of a project that has a reduced schema
    ///
    /// Resource types without a schema and non-resource keys pass through.
    pub fn apply_to_project(project: &mut ProjectRecord) {
        for (resource_type, entries) in project.resources_mut().iter_mut() {
            let Some(fields) = SchemaRegistry::reduced_fields(resource_type) else {
                continue;
            };
            for entry in entries.iter_mut() {
                *entry = Self::reduce_entry(entry, fields);
            }
        }
    }

    /// Copy of an entry holding exactly `fields`, in schema order
    ///
    /// Fields missing from the entry become an explicit `null`.
    pub fn reduce_entry(entry: &Value, fields: &[&str]) -> Value {
        let reduced: Map<String, Value> = fields
            .iter()
            .map(|field| {
                let value = entry.get(*field).cloned().unwrap_or(Value::Null);
                (field.to_string(), value)
            })
            .collect();
        Value::Object(reduced)
    }
}
