//! Nomination record, submission draft, and partial update types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{NominationId, Status};

/// A single submitted claim that a dish/restaurant pair deserves recognition.
///
/// Created on public submission with [`Status::Pending`]; mutated only through
/// admin updates; never deleted. Duplicate dish/restaurant/city combinations are
/// permitted and expected - each represents an independent vote.
///
/// JSON field names match the persisted collection layout (`dishName`,
/// `restaurantName`, `ip`, `userAgent`, `createdAt`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nomination {
    /// Unique id, generated at creation. Immutable.
    pub id: NominationId,
    pub dish_name: String,
    pub restaurant_name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: Status,
    /// Submitter IP, captured for the audit trail. Opaque string.
    pub ip: String,
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
}

impl Nomination {
    /// Apply a partial update, overwriting only the provided fields.
    ///
    /// The id and creation metadata are never touched; merge is shallow with
    /// last-write-wins semantics.
    pub fn apply(&mut self, update: &NominationUpdate) {
        if let Some(dish_name) = &update.dish_name {
            self.dish_name.clone_from(dish_name);
        }
        if let Some(restaurant_name) = &update.restaurant_name {
            self.restaurant_name.clone_from(restaurant_name);
        }
        if let Some(city) = &update.city {
            self.city.clone_from(city);
        }
        if let Some(description) = &update.description {
            self.description = Some(description.clone());
        }
        if let Some(notes) = &update.notes {
            self.notes = Some(notes.clone());
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

/// Errors that can occur when validating a [`NominationDraft`].
#[derive(Debug, Clone, thiserror::Error)]
pub enum DraftError {
    /// A required field is empty after trimming.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// Public submission payload, before the store assigns id/status/metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationDraft {
    pub dish_name: String,
    pub restaurant_name: String,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NominationDraft {
    /// Validate that the required fields are non-empty after trimming.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::MissingField`] naming the first empty required
    /// field (dish name, restaurant name, then city).
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.dish_name.trim().is_empty() {
            return Err(DraftError::MissingField("dishName"));
        }
        if self.restaurant_name.trim().is_empty() {
            return Err(DraftError::MissingField("restaurantName"));
        }
        if self.city.trim().is_empty() {
            return Err(DraftError::MissingField("city"));
        }
        Ok(())
    }
}

/// Partial update applied by an admin (moderation and/or field edits).
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NominationUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dish_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl NominationUpdate {
    /// A status-only update, the common moderation action.
    #[must_use]
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> Nomination {
        Nomination {
            id: NominationId::generate(),
            dish_name: "Empadão Goiano".to_owned(),
            restaurant_name: "Mercado Central".to_owned(),
            city: "Goiânia".to_owned(),
            description: Some("Com guariroba e linguiça.".to_owned()),
            notes: None,
            status: Status::Pending,
            ip: "192.168.1.1".to_owned(),
            user_agent: "Mozilla/5.0".to_owned(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_json_field_names_match_persisted_layout() {
        let json = serde_json::to_value(sample()).unwrap();
        let obj = json.as_object().unwrap();
        for key in ["id", "dishName", "restaurantName", "city", "status", "ip", "userAgent", "createdAt"] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        // notes is None and must be omitted entirely
        assert!(!obj.contains_key("notes"));
        assert_eq!(obj.get("status").unwrap(), "PENDING");
    }

    #[test]
    fn test_draft_validate_requires_non_blank_fields() {
        let draft = NominationDraft {
            dish_name: "Pamonha".to_owned(),
            restaurant_name: "Pamonharia Central".to_owned(),
            city: "Goiânia".to_owned(),
            description: None,
            notes: None,
        };
        assert!(draft.validate().is_ok());

        let blank_dish = NominationDraft {
            dish_name: "   ".to_owned(),
            ..draft.clone()
        };
        assert!(matches!(
            blank_dish.validate(),
            Err(DraftError::MissingField("dishName"))
        ));

        let blank_city = NominationDraft {
            city: String::new(),
            ..draft
        };
        assert!(matches!(
            blank_city.validate(),
            Err(DraftError::MissingField("city"))
        ));
    }

    #[test]
    fn test_apply_merges_only_provided_fields() {
        let mut nomination = sample();
        let original_id = nomination.id;
        let original_created = nomination.created_at;

        nomination.apply(&NominationUpdate {
            dish_name: Some("Empadão de Guariroba".to_owned()),
            status: Some(Status::Approved),
            ..NominationUpdate::default()
        });

        assert_eq!(nomination.dish_name, "Empadão de Guariroba");
        assert_eq!(nomination.status, Status::Approved);
        // Untouched fields survive
        assert_eq!(nomination.restaurant_name, "Mercado Central");
        assert_eq!(nomination.description.as_deref(), Some("Com guariroba e linguiça."));
        assert_eq!(nomination.id, original_id);
        assert_eq!(nomination.created_at, original_created);
    }

    #[test]
    fn test_apply_allows_any_status_transition() {
        let mut nomination = sample();
        nomination.apply(&NominationUpdate::status(Status::Rejected));
        assert_eq!(nomination.status, Status::Rejected);
        // Reverting to pending is allowed - the workflow is intentionally permissive
        nomination.apply(&NominationUpdate::status(Status::Pending));
        assert_eq!(nomination.status, Status::Pending);
    }
}
