use std::net::SocketAddr;
use std::path::PathBuf;

use deskmate_server::{serve, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3001".to_string())
        .parse()?;
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let static_dir = std::env::var("DESKMATE_STATIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("client"));

    serve(addr, AppConfig { static_dir }).await
}
