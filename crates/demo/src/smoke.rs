//! API smoke checks run once the server is reachable
//!
//! Mirrors the manual checks a developer would run against a fresh server:
//! fetch the schedule, fetch the health reminder, dispatch a device command
//! and verify the echo.

use tracing::info;

use deskmate_common::api::{
    CommandAck, CommandRequest, CommandStatus, HealthReminder, Schedule, DEFAULT_DEVICE_ID,
};

use crate::error::{DemoError, DemoResult};

/// Exercise the three mock endpoints and verify their contracts.
pub async fn run(base_url: &str) -> DemoResult<()> {
    let client = reqwest::Client::new();

    let schedule: Schedule = client
        .get(format!("{base_url}/api/schedule"))
        .send()
        .await?
        .json()
        .await?;
    if schedule.events.is_empty() || schedule.next != schedule.events[0] {
        return Err(DemoError::ApiCheck(
            "schedule `next` does not match the first event".to_string(),
        ));
    }
    info!("SCHEDULE: {} event(s), next at {}", schedule.events.len(), schedule.next.time);

    let health: HealthReminder = client
        .get(format!("{base_url}/api/health"))
        .send()
        .await?
        .json()
        .await?;
    info!("HEALTH: {}", health.message);

    let ack: CommandAck = client
        .post(format!("{base_url}/api/tuya/command"))
        .json(&CommandRequest {
            command: Some("toggle_light".to_string()),
            device_id: None,
        })
        .send()
        .await?
        .json()
        .await?;
    if ack.status != CommandStatus::Ok
        || ack.command != "toggle_light"
        || ack.device_id != DEFAULT_DEVICE_ID
    {
        return Err(DemoError::ApiCheck(format!(
            "unexpected command ack: status={:?} command={} device_id={}",
            ack.status, ack.command, ack.device_id
        )));
    }
    info!("TUYA POST: {} -> {}", ack.command, ack.device_id);

    Ok(())
}
