//! Declarative demo step sequence

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DemoResult;

/// A recorded demo scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoScript {
    /// Name used in logs
    pub name: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Viewport and recording size
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,

    /// Steps executed in order; the first failure aborts the recording
    pub steps: Vec<DemoStep>,
}

fn default_viewport() -> Viewport {
    Viewport {
        width: 1280,
        height: 720,
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// A single step in the demo
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DemoStep {
    /// Navigate to a URL (relative to the server base)
    Navigate { url: String },

    /// Wait a fixed amount of time; the demo is a timed walkthrough, not a
    /// test
    Sleep { ms: u64 },

    /// Click an element
    Click {
        selector: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
    },

    /// Emit a progress message into the recording log
    Log { message: String },
}

impl DemoScript {
    /// Parse a demo script from a YAML string
    pub fn from_yaml(yaml: &str) -> DemoResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a demo script from a YAML file
    pub fn from_file(path: &Path) -> DemoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// The built-in promo sequence: title card, then the three interaction
    /// flows (schedule query, health query, device toggle).
    pub fn builtin() -> Self {
        Self {
            name: "desk-assistant-promo".to_string(),
            description: "Scripted walkthrough of the three mock integrations".to_string(),
            viewport: default_viewport(),
            steps: vec![
                DemoStep::Log {
                    message: "Navigating to demo UI".to_string(),
                },
                DemoStep::Navigate {
                    url: "/".to_string(),
                },
                DemoStep::Sleep { ms: 800 },
                DemoStep::Log {
                    message: "Showing title card".to_string(),
                },
                DemoStep::Sleep { ms: 5000 },
                DemoStep::Log {
                    message: "Triggering schedule query".to_string(),
                },
                DemoStep::Click {
                    selector: "#ask-schedule".to_string(),
                    timeout_ms: None,
                },
                DemoStep::Sleep { ms: 3000 },
                DemoStep::Log {
                    message: "Triggering health query".to_string(),
                },
                DemoStep::Click {
                    selector: "#ask-health".to_string(),
                    timeout_ms: None,
                },
                DemoStep::Sleep { ms: 3000 },
                DemoStep::Log {
                    message: "Triggering device toggle".to_string(),
                },
                DemoStep::Click {
                    selector: "#toggle-light".to_string(),
                    timeout_ms: None,
                },
                DemoStep::Sleep { ms: 3000 },
                DemoStep::Log {
                    message: "Letting final audio drain".to_string(),
                },
                DemoStep::Sleep { ms: 1500 },
            ],
        }
    }
}
