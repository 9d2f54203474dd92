//! Deskmate mock API server
//!
//! Serves the demo SPA plus deterministic stand-ins for the three external
//! integrations the desk assistant talks to: calendar, health telemetry and
//! device-cloud command dispatch.

pub mod server;
pub mod static_files;

pub use server::{router, serve, AppConfig};
