//! Business logic and repository trait definitions for Caremate.
//!
//! This crate defines the "ports" (repository and auth traits) that the
//! infrastructure layer implements. It depends only on `caremate-types` --
//! never on `caremate-infra` or any database/IO crate.

pub mod auth;
pub mod chat;
pub mod responder;
