use indexmap::IndexSet;
use serde_json::Value;

/// Principal prefix of service account members in IAM bindings
const SERVICE_ACCOUNT_PREFIX: &str = "serviceAccount";

/// Derives impersonation candidates from a project's IAM policy
pub struct EscalationDiscovery;

impl EscalationDiscovery {
    /// Collects the distinct service accounts named in a policy's bindings
    ///
    /// Each binding is expected to carry a `members` list such as
    /// `["user:alice@example.com", "serviceAccount:b@proj.iam.gserviceaccount.com"]`.
    /// Only service account members are kept, with their principal prefix
    /// stripped. Duplicates collapse by exact string match; first-seen order is kept.
    ///
    /// # Arguments
    /// * `bindings` - IAM policy bindings, absent or empty when the policy could not be read
    pub fn derive_impersonation_candidates(bindings: Option<&[Value]>) -> IndexSet<String> {
        let mut candidates = IndexSet::new();
        let Some(bindings) = bindings else {
            return candidates;
        };

        for binding in bindings {
            let Some(members) = binding.get("members").and_then(Value::as_array) else {
                continue;
            };
            for member in members.iter().filter_map(Value::as_str) {
                if let Some(account) = Self::service_account_address(member) {
                    candidates.insert(account.to_string());
                }
            }
        }

        candidates
    }

    /// Extracts the account address from a `serviceAccount:<address>` member
    fn service_account_address(member: &str) -> Option<&str> {
        if !member.starts_with(SERVICE_ACCOUNT_PREFIX) || !member.contains('@') {
            return None;
        }
        let (_, rest) = member.split_once(':')?;
        let address = rest.split(':').next().unwrap_or(rest);
        if address.is_empty() {
            return None;
        }
        Some(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn candidates(policy: Value) -> Vec<String> {
        let bindings = policy.as_array().unwrap().clone();
        EscalationDiscovery::derive_impersonation_candidates(Some(&bindings))
            .into_iter()
            .collect()
    }

    #[test]
    fn test_extracts_service_accounts_only() {
        let result = candidates(json!([
            {
                "role": "roles/owner",
                "members": [
                    "user:alice@example.com",
                    "group:admins@example.com",
                    "serviceAccount:b@x.iam",
                    "domain:example.com",
                ]
            }
        ]));
        assert_eq!(result, vec!["b@x.iam".to_string()]);
    }

    #[test]
    fn test_duplicate_bindings_yield_one_candidate() {
        let result = candidates(json!([
            {"role": "roles/editor", "members": ["serviceAccount:c@x.iam"]},
            {"role": "roles/iam.serviceAccountTokenCreator", "members": ["serviceAccount:c@x.iam"]},
        ]));
        assert_eq!(result, vec!["c@x.iam".to_string()]);
    }

    #[test]
    fn test_dedup_is_case_sensitive_and_order_preserving() {
        let result = candidates(json!([
            {"members": ["serviceAccount:z@x.iam", "serviceAccount:C@x.iam", "serviceAccount:c@x.iam"]},
            {"members": ["serviceAccount:z@x.iam"]},
        ]));
        assert_eq!(
            result,
            vec![
                "z@x.iam".to_string(),
                "C@x.iam".to_string(),
                "c@x.iam".to_string()
            ]
        );
    }

    #[test]
    fn test_rejects_members_without_address() {
        let result = candidates(json!([
            {"members": ["serviceAccount", "serviceAccount:no-at-sign", "serviceAccount:"]},
        ]));
        assert!(result.is_empty());
    }

    #[test]
    fn test_absent_or_empty_policy() {
        assert!(EscalationDiscovery::derive_impersonation_candidates(None).is_empty());
        assert!(EscalationDiscovery::derive_impersonation_candidates(Some(&[])).is_empty());
    }

    #[test]
    fn test_bindings_without_members_are_skipped() {
        let result = candidates(json!([
            {"role": "roles/viewer"},
            {"role": "roles/owner", "members": ["serviceAccount:d@x.iam"]},
        ]));
        assert_eq!(result, vec!["d@x.iam".to_string()]);
    }
}
