//! Deskmate demo harness
//!
//! Spawns the mock server as a subprocess, waits for it to become reachable
//! with a bounded readiness poll, smoke-checks the API surface and records a
//! scripted browser walkthrough to a video file via Playwright.

pub mod error;
pub mod poller;
pub mod recorder;
pub mod script;
pub mod server;
pub mod smoke;

pub use error::{DemoError, DemoResult};
pub use poller::{poll, PollConfig, PollOutcome};
pub use script::{DemoScript, DemoStep};
pub use server::{ServerConfig, ServerHandle};
