//! Chat session and message orchestration.
//!
//! `repository` defines the storage ports, `service` runs the send/reply
//! exchange over them, and `workspace` holds the per-user view state
//! (session list, selection, loaded messages).

pub mod repository;
pub mod service;
pub mod workspace;

#[cfg(test)]
pub(crate) mod testing;
