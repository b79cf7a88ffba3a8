//! Authentication boundary: the service port and the auth-event bus.

pub mod bus;
pub mod service;

pub use bus::{AuthEvent, AuthEventBus};
pub use service::{AuthService, AuthSession};
