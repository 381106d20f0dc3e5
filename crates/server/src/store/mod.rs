//! Nomination store: all reads and writes over the storage substrate.
//!
//! # Collections
//!
//! - `nominations` - ordered sequence of nomination records
//! - `auditLog` - append-only admin action trail
//! - `ipRateLimit` - ip → last-submission timestamp (millis)
//!
//! Every operation is a whole-collection read-modify-write, serialized behind a
//! single write lock: the system has exactly one logical writer, and each write
//! replaces the collection atomically from the caller's perspective.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use meet_goias_core::{
    AuditLogEntry, Nomination, NominationDraft, NominationId, NominationUpdate, Status,
};

pub mod seed;
pub mod storage;

pub use storage::{JsonFileStorage, MemoryStorage, Storage, StorageError};

/// Collection keys in the storage substrate.
mod keys {
    pub const NOMINATIONS: &str = "nominations";
    pub const AUDIT_LOG: &str = "auditLog";
    pub const IP_RATE_LIMIT: &str = "ipRateLimit";
}

/// Errors from store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Update targeted an id that is not in the record set.
    #[error("Nomination {0} not found")]
    NotFound(NominationId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The nomination repository.
///
/// Cheaply cloneable; all clones share the same storage handle and write lock.
#[derive(Clone)]
pub struct NominationStore {
    storage: Arc<dyn Storage>,
    write_lock: Arc<Mutex<()>>,
}

impl NominationStore {
    #[must_use]
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Check that the storage substrate is reachable.
    ///
    /// # Errors
    ///
    /// Returns the underlying storage error if the read fails.
    pub async fn ping(&self) -> Result<(), StoreError> {
        self.storage.get(keys::NOMINATIONS).await?;
        Ok(())
    }

    /// Seed the nomination collection if it has never been written.
    ///
    /// Returns `true` when seeding happened. A present-but-empty collection is
    /// left alone - only a missing key counts as "never initialized".
    ///
    /// # Errors
    ///
    /// Returns the underlying storage error if the read or write fails.
    pub async fn seed_if_empty(&self) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        if self.storage.get(keys::NOMINATIONS).await?.is_some() {
            return Ok(false);
        }
        self.save(keys::NOMINATIONS, &seed::seed_nominations())
            .await?;
        Ok(true)
    }

    /// Append a new nomination from a validated draft.
    ///
    /// Assigns a fresh unique id, sets status to PENDING, stamps creation time,
    /// and records the submitter's IP in the rate-limit timestamp log. Never
    /// rejects duplicates - repeated dish/restaurant/city combinations are
    /// independent votes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if persistence fails; the nomination
    /// collection is only replaced after a fully successful serialization.
    pub async fn submit(
        &self,
        draft: NominationDraft,
        ip: String,
        user_agent: String,
    ) -> Result<Nomination, StoreError> {
        let _guard = self.write_lock.lock().await;

        let nomination = Nomination {
            id: NominationId::generate(),
            dish_name: draft.dish_name,
            restaurant_name: draft.restaurant_name,
            city: draft.city,
            description: draft.description,
            notes: draft.notes,
            status: Status::Pending,
            ip: ip.clone(),
            user_agent,
            created_at: Utc::now(),
        };

        let mut nominations: Vec<Nomination> = self.load(keys::NOMINATIONS).await?;
        nominations.push(nomination.clone());
        self.save(keys::NOMINATIONS, &nominations).await?;

        self.record_submission_ip(&ip).await?;

        Ok(nomination)
    }

    /// All records, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn list_all(&self) -> Result<Vec<Nomination>, StoreError> {
        Ok(self.load(keys::NOMINATIONS).await?)
    }

    /// All APPROVED records, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn list_approved(&self) -> Result<Vec<Nomination>, StoreError> {
        let mut nominations = self.list_all().await?;
        nominations.retain(|n| n.status == Status::Approved);
        Ok(nominations)
    }

    /// Merge a partial update into the record with `id` and append exactly one
    /// audit entry describing the dominant change.
    ///
    /// The description priority is first-match-wins, not cumulative: a status
    /// change wins over a dish rename, which wins over the generic description.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` (leaving the record set unchanged) if the
    /// id is absent, or `StoreError::Storage` if persistence fails.
    pub async fn update(
        &self,
        id: NominationId,
        update: &NominationUpdate,
        admin_email: &str,
    ) -> Result<Nomination, StoreError> {
        let _guard = self.write_lock.lock().await;

        let mut nominations: Vec<Nomination> = self.load(keys::NOMINATIONS).await?;
        let nomination = nominations
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound(id))?;

        let old_status = nomination.status;
        nomination.apply(update);

        let action = if update.status.is_some_and(|status| status != old_status) {
            format!(
                "Changed status of \"{}\" to {}",
                nomination.dish_name, nomination.status
            )
        } else if let Some(dish_name) = &update.dish_name {
            format!("Renamed dish to \"{dish_name}\"")
        } else {
            format!("Updated ID {id}")
        };

        let updated = nomination.clone();
        self.save(keys::NOMINATIONS, &nominations).await?;

        let mut audit: Vec<AuditLogEntry> = self.load(keys::AUDIT_LOG).await?;
        audit.push(AuditLogEntry::record(admin_email, action));
        self.save(keys::AUDIT_LOG, &audit).await?;

        Ok(updated)
    }

    /// The full audit trail, in append order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` if the read fails.
    pub async fn audit_log(&self) -> Result<Vec<AuditLogEntry>, StoreError> {
        Ok(self.load(keys::AUDIT_LOG).await?)
    }

    /// Record the submitter's last-submission timestamp.
    ///
    /// The 24h blocking check that would consume this log is deliberately not
    /// implemented; the timestamps are recorded for auditing and for a future
    /// product decision on enforcement.
    async fn record_submission_ip(&self, ip: &str) -> Result<(), StorageError> {
        let mut log: HashMap<String, i64> = self.load(keys::IP_RATE_LIMIT).await?;
        log.insert(ip.to_owned(), Utc::now().timestamp_millis());
        self.save(keys::IP_RATE_LIMIT, &log).await
    }

    async fn load<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T, StorageError> {
        match self.storage.get(key).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(T::default()),
        }
    }

    async fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        self.storage.put(key, serde_json::to_value(value)?).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn draft(dish: &str, restaurant: &str, city: &str) -> NominationDraft {
        NominationDraft {
            dish_name: dish.to_owned(),
            restaurant_name: restaurant.to_owned(),
            city: city.to_owned(),
            description: None,
            notes: None,
        }
    }

    fn store() -> NominationStore {
        NominationStore::new(MemoryStorage::shared())
    }

    async fn submit(store: &NominationStore, dish: &str) -> Nomination {
        store
            .submit(
                draft(dish, "Restaurante X", "Goiânia"),
                "10.0.0.1".to_owned(),
                "test-agent".to_owned(),
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_submit_assigns_pending_and_unique_ids() {
        let store = store();
        let mut ids = Vec::new();
        for i in 0..20 {
            let nomination = submit(&store, &format!("Prato {i}")).await;
            assert_eq!(nomination.status, Status::Pending);
            ids.push(nomination.id);
        }
        ids.sort_by_key(NominationId::as_uuid);
        ids.dedup();
        assert_eq!(ids.len(), 20);
        assert_eq!(store.list_all().await.unwrap().len(), 20);
    }

    #[tokio::test]
    async fn test_submit_allows_duplicates() {
        let store = store();
        submit(&store, "Pamonha").await;
        submit(&store, "Pamonha").await;
        assert_eq!(store.list_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_submit_records_ip_timestamp() {
        let store = store();
        submit(&store, "Pamonha").await;
        let log: HashMap<String, i64> = serde_json::from_value(
            store
                .storage
                .get(keys::IP_RATE_LIMIT)
                .await
                .unwrap()
                .unwrap(),
        )
        .unwrap();
        assert!(log.contains_key("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_list_approved_filters_and_keeps_order() {
        let store = store();
        let first = submit(&store, "A").await;
        let second = submit(&store, "B").await;
        submit(&store, "C").await;

        store
            .update(second.id, &NominationUpdate::status(Status::Approved), "a@b.c")
            .await
            .unwrap();
        store
            .update(first.id, &NominationUpdate::status(Status::Approved), "a@b.c")
            .await
            .unwrap();

        let approved = store.list_approved().await.unwrap();
        // Insertion order, not approval order
        assert_eq!(
            approved.iter().map(|n| n.dish_name.as_str()).collect::<Vec<_>>(),
            vec!["A", "B"]
        );
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_records_unchanged() {
        let store = store();
        submit(&store, "Pamonha").await;
        let before = store.list_all().await.unwrap();

        let result = store
            .update(
                NominationId::generate(),
                &NominationUpdate::status(Status::Approved),
                "a@b.c",
            )
            .await;

        assert!(matches!(result, Err(StoreError::NotFound(_))));
        assert_eq!(store.list_all().await.unwrap(), before);
        assert!(store.audit_log().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_audit_prefers_status_change() {
        let store = store();
        let nomination = submit(&store, "Pamonha").await;

        // Status change AND rename in one update: the status change wins
        store
            .update(
                nomination.id,
                &NominationUpdate {
                    dish_name: Some("Pamonha Salgada".to_owned()),
                    status: Some(Status::Approved),
                    ..NominationUpdate::default()
                },
                "admin@goias.com.br",
            )
            .await
            .unwrap();

        let audit = store.audit_log().await.unwrap();
        assert_eq!(audit.len(), 1);
        let entry = audit.first().unwrap();
        assert_eq!(entry.admin_email, "admin@goias.com.br");
        assert_eq!(
            entry.action,
            "Changed status of \"Pamonha Salgada\" to APPROVED"
        );
    }

    #[tokio::test]
    async fn test_update_audit_rename_when_status_unchanged() {
        let store = store();
        let nomination = submit(&store, "Pamonha").await;

        // Sending the current status along with a rename is not a status change
        store
            .update(
                nomination.id,
                &NominationUpdate {
                    dish_name: Some("Pamonha Doce".to_owned()),
                    status: Some(Status::Pending),
                    ..NominationUpdate::default()
                },
                "a@b.c",
            )
            .await
            .unwrap();

        let audit = store.audit_log().await.unwrap();
        assert_eq!(
            audit.first().unwrap().action,
            "Renamed dish to \"Pamonha Doce\""
        );
    }

    #[tokio::test]
    async fn test_update_audit_generic_description() {
        let store = store();
        let nomination = submit(&store, "Pamonha").await;

        store
            .update(
                nomination.id,
                &NominationUpdate {
                    city: Some("Anápolis".to_owned()),
                    ..NominationUpdate::default()
                },
                "a@b.c",
            )
            .await
            .unwrap();

        let audit = store.audit_log().await.unwrap();
        assert_eq!(
            audit.first().unwrap().action,
            format!("Updated ID {}", nomination.id)
        );
    }

    #[tokio::test]
    async fn test_every_update_appends_one_audit_entry() {
        let store = store();
        let nomination = submit(&store, "Pamonha").await;

        for status in [Status::Approved, Status::Rejected, Status::Pending] {
            store
                .update(nomination.id, &NominationUpdate::status(status), "a@b.c")
                .await
                .unwrap();
        }

        assert_eq!(store.audit_log().await.unwrap().len(), 3);
        // Any-to-any transitions are allowed, including back to pending
        let current = store.list_all().await.unwrap();
        assert_eq!(current.first().unwrap().status, Status::Pending);
    }

    #[tokio::test]
    async fn test_seed_if_empty_runs_once() {
        let store = store();
        assert!(store.seed_if_empty().await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 4);

        assert!(!store.seed_if_empty().await.unwrap());
        assert_eq!(store.list_all().await.unwrap().len(), 4);
    }
}
