//! Shared domain types for Caremate.
//!
//! This crate contains the core domain types used across the Caremate
//! service: User, ChatSession, ChatMessage, and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod error;
pub mod user;
