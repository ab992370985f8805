//! Sends a reset signal to a running bot over the loopback relay.
//!
//! Usage: `polarity-signal <daily|weekly|weekend>`
//!
//! The relay port is `PORT - 100`, read from the same environment as the bot.

use std::time::Duration;

use polarity::{config::signal_port_for, model::announcement::AnnouncementKind, startup};

const DEFAULT_PORT: u16 = 5000;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ATTEMPTS: u32 = 3;
const BACKOFF_STEP: Duration = Duration::from_secs(2);

fn parse_kind(arg: &str) -> Option<AnnouncementKind> {
    match arg {
        "daily" => Some(AnnouncementKind::Daily),
        "weekly" => Some(AnnouncementKind::Weekly),
        "weekend" => Some(AnnouncementKind::Weekend),
        _ => None,
    }
}

async fn send(client: &reqwest::Client, url: &str) -> Result<(), reqwest::Error> {
    let response = client.post(url).send().await?.error_for_status()?;
    tracing::info!("Relay answered {}", response.status());

    Ok(())
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let Some(kind) = std::env::args().nth(1).as_deref().and_then(parse_kind) else {
        tracing::error!("Usage: polarity-signal <daily|weekly|weekend>");
        return std::process::ExitCode::FAILURE;
    };

    let port = match std::env::var("PORT") {
        Ok(value) => match value.parse() {
            Ok(port) => port,
            Err(_) => {
                tracing::error!("PORT is not a valid port: {}", value);
                return std::process::ExitCode::FAILURE;
            }
        },
        Err(_) => DEFAULT_PORT,
    };
    let url = format!(
        "http://127.0.0.1:{}/{}",
        signal_port_for(port),
        kind.signal_name()
    );

    let client = match reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("Failed to build HTTP client: {}", e);
            return std::process::ExitCode::FAILURE;
        }
    };

    for attempt in 1..=ATTEMPTS {
        match send(&client, &url).await {
            Ok(()) => return std::process::ExitCode::SUCCESS,
            Err(e) if attempt < ATTEMPTS => {
                let backoff = BACKOFF_STEP * attempt;
                tracing::warn!(
                    "Attempt {}/{} to signal {} failed: {}, retrying in {:?}",
                    attempt,
                    ATTEMPTS,
                    url,
                    e,
                    backoff
                );
                tokio::time::sleep(backoff).await;
            }
            Err(e) => tracing::error!("Giving up on {} after {} attempts: {}", url, ATTEMPTS, e),
        }
    }

    std::process::ExitCode::FAILURE
}
