//! Network layer - backend HTTP calls
//!
//! The Network actor receives commands from the App actor and sends back
//! one response per command.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::ApiClient;
