//! Demo harness entry point
//!
//! Spawns the mock server (or attaches to a running one), smoke-checks the
//! API and records the scripted walkthrough. Exit code 0 on success, 1 on
//! any failure after best-effort teardown.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use deskmate_demo::poller::{poll, PollConfig};
use deskmate_demo::recorder::{DemoRecorder, RecorderConfig};
use deskmate_demo::script::DemoScript;
use deskmate_demo::server::{ServerConfig, ServerHandle};
use deskmate_demo::{smoke, DemoResult};

#[derive(Parser, Debug)]
#[command(name = "deskmate-demo")]
#[command(about = "Record a scripted demo of the Deskmate mock server")]
struct Args {
    /// Path to the mock server binary
    #[arg(long, default_value = "target/debug/deskmate-server")]
    server_binary: PathBuf,

    /// Directory containing the SPA bundle
    #[arg(long, default_value = "client")]
    static_dir: PathBuf,

    /// Port to run the server on (0 = pick a free port)
    #[arg(long, default_value = "0")]
    port: u16,

    /// Attach to an already running server instead of spawning one
    #[arg(long)]
    url: Option<String>,

    /// Readiness poll attempt budget
    #[arg(long, default_value = "20")]
    attempts: usize,

    /// Readiness poll interval in milliseconds
    #[arg(long, default_value = "500")]
    interval_ms: u64,

    /// YAML demo script (defaults to the built-in promo sequence)
    #[arg(long)]
    script: Option<PathBuf>,

    /// Directory the recorded video(s) are written to
    #[arg(long, default_value = "videos")]
    video_dir: PathBuf,

    /// Run the API smoke checks and exit without recording
    #[arg(long)]
    smoke_only: bool,

    /// Run the browser with a visible window
    #[arg(long)]
    headed: bool,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if let Err(e) = run(args).await {
        error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> DemoResult<()> {
    let script = match &args.script {
        Some(path) => DemoScript::from_file(path)?,
        None => DemoScript::builtin(),
    };

    // Either attach to a running server or spawn our own. The handle tears
    // the child process down on every exit path, including early returns.
    let mut spawned = None;
    let base_url = match args.url.clone() {
        Some(url) => {
            let probe = PollConfig {
                attempts: args.attempts,
                interval: Duration::from_millis(args.interval_ms),
                ..PollConfig::new(format!("{url}/api/health"))
            };
            poll(&probe).await?;
            url
        }
        None => {
            let server = ServerHandle::spawn(ServerConfig {
                binary_path: args.server_binary.clone(),
                static_dir: args.static_dir.clone(),
                port: if args.port == 0 { None } else { Some(args.port) },
                poll_attempts: args.attempts,
                poll_interval: Duration::from_millis(args.interval_ms),
            })
            .await?;
            let url = server.base_url().to_string();
            spawned = Some(server);
            url
        }
    };

    smoke::run(&base_url).await?;

    if args.smoke_only {
        info!("Smoke checks passed; skipping recording");
        return Ok(());
    }

    let recorder = DemoRecorder::new(RecorderConfig {
        base_url: base_url.clone(),
        video_dir: args.video_dir.clone(),
        headless: !args.headed,
    })?;

    let videos = recorder.record(&script).await?;

    info!("Videos written to: {}", args.video_dir.display());
    for video in &videos {
        info!(" - {}", video.display());
    }

    drop(spawned);
    Ok(())
}
