//! Hub server
//!
//! TCP accept loop and configuration surface.

pub mod config;
pub mod listener;

pub use config::HubConfig;
pub use listener::HubServer;
