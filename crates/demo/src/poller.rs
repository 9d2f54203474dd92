//! Bounded readiness polling against a freshly started HTTP service

use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::sleep;
use tracing::{debug, info};

use crate::error::{DemoError, DemoResult};

/// Poll configuration
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Target URL probed once per attempt.
    pub url: String,

    /// Maximum number of requests before giving up.
    pub attempts: usize,

    /// Delay between consecutive attempts.
    pub interval: Duration,

    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl PollConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attempts: 20,
            interval: Duration::from_millis(500),
            request_timeout: Duration::from_secs(2),
        }
    }
}

/// Outcome of a successful poll
#[derive(Debug)]
pub struct PollOutcome {
    /// Status code of the terminating response. Any status counts: this is
    /// a liveness check, not a correctness check.
    pub status: StatusCode,

    /// Fully read response body.
    pub body: String,

    /// Number of requests issued, including the terminating one.
    pub attempts: usize,
}

/// Repeatedly GET `config.url` until any response is fully read or the
/// attempt budget is exhausted.
///
/// Transport errors are swallowed per attempt and counted toward the
/// budget; only exhaustion is reported, carrying the last error observed.
/// Attempts run sequentially with an awaited delay between them and the
/// loop terminates on exactly one path.
pub async fn poll(config: &PollConfig) -> DemoResult<PollOutcome> {
    let client = reqwest::Client::builder()
        .timeout(config.request_timeout)
        .build()?;

    let mut last_error = None;

    for attempt in 1..=config.attempts {
        match probe(&client, &config.url).await {
            Ok((status, body)) => {
                info!(
                    "{} reachable after {} attempt(s) ({})",
                    config.url, attempt, status
                );
                return Ok(PollOutcome {
                    status,
                    body,
                    attempts: attempt,
                });
            }
            Err(e) => {
                if attempt == 1 {
                    info!("Waiting for {} to come up...", config.url);
                }
                debug!("attempt {}/{} failed: {}", attempt, config.attempts, e);
                last_error = Some(e);
            }
        }

        if attempt < config.attempts {
            sleep(config.interval).await;
        }
    }

    Err(DemoError::Timeout {
        url: config.url.clone(),
        attempts: config.attempts,
        last_error,
    })
}

/// A probe succeeds once a response arrives and its body is fully read;
/// the status code is not inspected.
async fn probe(
    client: &reqwest::Client,
    url: &str,
) -> Result<(StatusCode, String), reqwest::Error> {
    let resp = client.get(url).send().await?;
    let status = resp.status();
    let body = resp.text().await?;
    Ok((status, body))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept connections and answer each with a canned HTTP response.
    async fn canned_server(status_line: &'static str) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = stream.read(&mut buf).await;
                    let body = "ok";
                    let resp = format!(
                        "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                        body.len()
                    );
                    let _ = stream.write_all(resp.as_bytes()).await;
                });
            }
        });

        addr
    }

    fn fast_config(url: String, attempts: usize) -> PollConfig {
        PollConfig {
            attempts,
            interval: Duration::from_millis(40),
            ..PollConfig::new(url)
        }
    }

    #[tokio::test]
    async fn resolves_on_first_attempt_when_reachable() {
        let addr = canned_server("200 OK").await;

        let outcome = poll(&fast_config(format!("http://{addr}/"), 5))
            .await
            .unwrap();

        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.status, StatusCode::OK);
        assert_eq!(outcome.body, "ok");
    }

    #[tokio::test]
    async fn error_status_still_terminates_the_poll() {
        let addr = canned_server("503 Service Unavailable").await;

        let outcome = poll(&fast_config(format!("http://{addr}/"), 5))
            .await
            .unwrap();

        assert_eq!(outcome.attempts, 1);
        assert_eq!(outcome.status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn fails_after_exactly_the_attempt_budget() {
        // Reserve a port and close it again: nothing is listening there.
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        let err = poll(&fast_config(format!("http://{addr}/"), 3))
            .await
            .unwrap_err();

        match err {
            DemoError::Timeout {
                attempts,
                last_error,
                ..
            } => {
                assert_eq!(attempts, 3);
                assert!(last_error.is_some());
            }
            other => panic!("expected Timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn resolves_once_the_service_comes_up_mid_budget() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap()
        };

        // Bring the service up after the first few attempts have failed.
        tokio::spawn(async move {
            sleep(Duration::from_millis(120)).await;
            let listener = TcpListener::bind(addr).await.unwrap();
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf).await;
                let resp =
                    "HTTP/1.1 200 OK\r\ncontent-length: 2\r\nconnection: close\r\n\r\nok";
                let _ = stream.write_all(resp.as_bytes()).await;
            }
        });

        let outcome = poll(&fast_config(format!("http://{addr}/"), 20))
            .await
            .unwrap();

        assert!(outcome.attempts > 1, "first attempt should have failed");
        assert!(outcome.attempts <= 20);
        assert_eq!(outcome.status, StatusCode::OK);
    }
}
