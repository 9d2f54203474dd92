//! Server process management - spawning and readiness checking the mock server

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::Duration;

use tracing::info;

use crate::error::{DemoError, DemoResult};
use crate::poller::{poll, PollConfig};

/// Handle to a running mock server process
pub struct ServerHandle {
    child: Child,
    base_url: String,
    pub port: u16,
}

impl ServerHandle {
    /// Spawn the deskmate-server binary and wait until it is reachable.
    pub async fn spawn(config: ServerConfig) -> DemoResult<Self> {
        let port = config.port.unwrap_or_else(find_free_port);
        let base_url = format!("http://127.0.0.1:{}", port);

        info!("Spawning mock server on port {}", port);

        let mut cmd = Command::new(&config.binary_path);
        cmd.env("PORT", port.to_string())
            .env("DESKMATE_STATIC_DIR", &config.static_dir)
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().map_err(|e| {
            DemoError::ServerStartup(format!(
                "Failed to spawn {}: {}",
                config.binary_path.display(),
                e
            ))
        })?;

        let handle = ServerHandle {
            child,
            base_url: base_url.clone(),
            port,
        };

        let probe = PollConfig {
            attempts: config.poll_attempts,
            interval: config.poll_interval,
            ..PollConfig::new(format!("{}/api/health", base_url))
        };
        poll(&probe).await?;

        info!("Mock server ready at {}", base_url);
        Ok(handle)
    }

    /// Base URL of the spawned server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stop the server: SIGTERM first, then force kill and reap.
    pub fn stop(&mut self) {
        info!("Stopping mock server (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Configuration for spawning the mock server
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Path to the deskmate-server binary
    pub binary_path: PathBuf,

    /// Directory containing the SPA bundle
    pub static_dir: PathBuf,

    /// Port to listen on (None = find a free port)
    pub port: Option<u16>,

    /// Readiness poll attempt budget
    pub poll_attempts: usize,

    /// Delay between readiness probes
    pub poll_interval: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            binary_path: PathBuf::from("target/debug/deskmate-server"),
            static_dir: PathBuf::from("client"),
            port: None,
            poll_attempts: 20,
            poll_interval: Duration::from_millis(500),
        }
    }
}

/// Find a free port to use
fn find_free_port() -> u16 {
    use std::net::TcpListener;

    TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind to find free port")
        .local_addr()
        .expect("Failed to get local addr")
        .port()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_free_port() {
        let port1 = find_free_port();
        let port2 = find_free_port();

        assert!(port1 > 1024);
        assert!(port2 > 1024);
    }
}
