//! Wire types for the mock API surface
//!
//! All responses are pure functions of their request; nothing here carries
//! identity or server-side state. Ack and error are separate types: each
//! serializes exactly the fields its wire shape allows.

use serde::{Deserialize, Serialize};

/// `device_id` echoed back when the caller omits one.
pub const DEFAULT_DEVICE_ID: &str = "default";

/// Message returned when a command dispatch request carries no usable command.
pub const COMMAND_REQUIRED: &str = "Command is required";

/// A single calendar entry in the mock schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub time: String,
    pub title: String,
}

/// Response payload for `GET /api/schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Upcoming events, soonest first.
    pub events: Vec<ScheduleEvent>,
    /// Duplicates the first event for quick "what's next" rendering.
    pub next: ScheduleEvent,
}

impl Schedule {
    /// The fixed demo schedule. Rebuilt fresh per request.
    pub fn mock() -> Self {
        let events = vec![
            ScheduleEvent {
                time: "09:00".to_string(),
                title: "Standup".to_string(),
            },
            ScheduleEvent {
                time: "10:30".to_string(),
                title: "Design review".to_string(),
            },
        ];
        let next = events[0].clone();
        Self { events, next }
    }
}

/// Response payload for `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthReminder {
    pub message: String,
}

impl HealthReminder {
    /// The fixed sedentary reminder.
    pub fn mock() -> Self {
        Self {
            message: "You have been sitting 90 minutes. Consider a 2-minute stretch.".to_string(),
        }
    }
}

/// Request body for `POST /api/tuya/command`.
///
/// `command` is optional at the type level so an empty JSON object still
/// deserializes; presence is validated by the server, which is the only
/// validation in the system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub command: Option<String>,
    pub device_id: Option<String>,
}

/// Outcome marker carried by every command dispatch response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandStatus {
    Ok,
    Error,
}

/// Success response for `POST /api/tuya/command`: echoes the dispatched
/// command. No device state is tracked anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandAck {
    pub status: CommandStatus,
    pub command: String,
    pub device_id: String,
}

impl CommandAck {
    /// Echo a validated command, defaulting the device id.
    pub fn echo(command: String, device_id: Option<String>) -> Self {
        Self {
            status: CommandStatus::Ok,
            command,
            device_id: device_id.unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string()),
        }
    }
}

/// Error response body for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: CommandStatus,
    pub message: String,
}

impl ApiError {
    /// The fixed response for a missing or empty command.
    pub fn command_required() -> Self {
        Self {
            status: CommandStatus::Error,
            message: COMMAND_REQUIRED.to_string(),
        }
    }
}
