//! Session-related types.
//!
//! Types stored in the session: the authenticated admin and the pending
//! security-challenge answer.

use meet_goias_core::AdminUser;
use serde::{Deserialize, Serialize};

/// Session-stored admin identity.
///
/// Presence of this record in the session IS the authentication state; there
/// is no token or role model behind it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<AdminUser> for CurrentAdmin {
    fn from(admin: AdminUser) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }
    }
}

impl From<CurrentAdmin> for AdminUser {
    fn from(admin: CurrentAdmin) -> Self {
        Self {
            id: admin.id,
            email: admin.email,
            name: admin.name,
        }
    }
}

/// Session keys.
pub mod session_keys {
    /// Key for storing the current logged-in admin.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the expected answer of the pending arithmetic challenge.
    pub const CHALLENGE_ANSWER: &str = "challenge_answer";
}
