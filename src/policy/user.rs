//! Plan-time validation for database users.

use crate::reconciler::error::{Error, Result};
use crate::spec::user::UserSpec;

pub fn validate_user(spec: &UserSpec) -> Result<()> {
    if spec.name.trim().is_empty() {
        return Err(Error::validation("user name must not be empty"));
    }
    if let Some(settings) = &spec.settings {
        // Settings carry zero-or-one ACL family: Kafka topic ACLs or
        // OpenSearch index ACLs, never both.
        if !settings.acl.is_empty() && !settings.opensearch_acl.is_empty() {
            return Err(Error::validation(
                "settings may contain at most one of acl or opensearch_acl",
            ));
        }
        for acl in &settings.acl {
            if acl.topic.trim().is_empty() {
                return Err(Error::validation("acl topic must not be empty"));
            }
        }
        for acl in &settings.opensearch_acl {
            if acl.index.trim().is_empty() {
                return Err(Error::validation("opensearch_acl index must not be empty"));
            }
        }
    }
    Ok(())
}
