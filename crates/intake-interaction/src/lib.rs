//! Backend interaction for the Intake client.
//!
//! Provides the HTTP implementation of `intake_core::IntakeTransport` and the
//! configuration loader that decides which backend it talks to.

pub mod config;
pub mod http_client;

pub use config::{ConfigOverrides, default_config_path, load_client_config};
pub use http_client::HttpIntakeClient;
