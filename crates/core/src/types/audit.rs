//! Audit trail entries for admin-performed mutations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AuditEntryId;

/// An immutable record of an admin-performed mutation.
///
/// Created alongside every nomination update (exactly one per mutation);
/// append-only, never mutated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    pub id: AuditEntryId,
    /// Identity of the admin who performed the action.
    pub admin_email: String,
    /// Human-readable description, e.g. `Changed status of "Pamonha" to APPROVED`.
    pub action: String,
    pub timestamp: DateTime<Utc>,
}

impl AuditLogEntry {
    /// Build a new entry stamped with the current time.
    #[must_use]
    pub fn record(admin_email: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            id: AuditEntryId::generate(),
            admin_email: admin_email.into(),
            action: action.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_record_stamps_identity_and_action() {
        let entry = AuditLogEntry::record("admin@goias.com.br", "Updated ID 42");
        assert_eq!(entry.admin_email, "admin@goias.com.br");
        assert_eq!(entry.action, "Updated ID 42");
    }

    #[test]
    fn test_entries_have_distinct_ids() {
        let a = AuditLogEntry::record("admin@goias.com.br", "x");
        let b = AuditLogEntry::record("admin@goias.com.br", "x");
        assert_ne!(a.id, b.id);
    }
}
