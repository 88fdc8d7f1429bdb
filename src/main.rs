//! scam-honeypot - JSON-lines driver.
//!
//! Reads one request per line from stdin and writes one JSON document per
//! line to stdout. Logs go to stderr.
//!
//! ```text
//! {"message": "You won a prize!"}
//! {"message": "Send 500 to claim@ybl", "conversation_id": "<uuid>"}
//! {"report": "<uuid>"}
//! {"conversation": "<uuid>"}
//! {"list": true}
//! ```

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use scam_honeypot::application::HoneypotService;
use scam_honeypot::config::AppConfig;

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_new(&config.runtime.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info,scam_honeypot=debug"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);

    let service = HoneypotService::from_config(&config)?;
    service.restore().await?;
    tracing::info!(
        max_turns = config.engagement.max_turns,
        storage = ?config.storage.backend,
        "Honeypot ready, reading requests from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let response = service.respond(&line).await;
        stdout.write_all(response.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    tracing::info!("stdin closed, shutting down");
    Ok(())
}
