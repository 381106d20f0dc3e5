//! Server-side view and session models.

mod session;

pub use session::{CurrentAdmin, session_keys};
