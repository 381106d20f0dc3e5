//! Administrator identity.

use serde::{Deserialize, Serialize};

/// The single configured administrator.
///
/// Session presence of this record is the entire authentication state - there is
/// no role system and no multi-user support.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: String,
    pub email: String,
    pub name: String,
}
