//! Shared primitives for the Deskmate mock backend
//!
//! The server crate serializes these types on the wire; the demo harness
//! deserializes them back when smoke-checking a running server.

pub mod api;

pub use api::{
    ApiError, CommandAck, CommandRequest, CommandStatus, HealthReminder, Schedule, ScheduleEvent,
};
