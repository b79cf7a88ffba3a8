//! Infrastructure layer for Caremate.
//!
//! Contains implementations of the ports defined in `caremate-core`:
//! SQLite-backed session, message, and auth storage.

pub mod sqlite;
