//! Domain types for the nomination system.

mod admin;
mod audit;
mod id;
mod nomination;
mod status;

pub use admin::AdminUser;
pub use audit::AuditLogEntry;
pub use id::{AuditEntryId, NominationId};
pub use nomination::{DraftError, Nomination, NominationDraft, NominationUpdate};
pub use status::{Status, StatusParseError};
