//! Meet Goiás Core - Shared types library.
//!
//! This crate provides common types used across all Meet Goiás components:
//! - `server` - Public nomination submission and admin moderation service
//! - `integration-tests` - End-to-end test suite
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no HTTP. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Nomination records, moderation status, audit entries, ids
//! - [`stats`] - Aggregation: grouped counts, rankings, dish-name normalization

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod stats;
pub mod types;

pub use stats::*;
pub use types::*;
