//! jellygate CLI — pause SABnzbd while Jellyfin is streaming.

use clap::Parser;
use jellygate::config::{Config, Overrides};
use jellygate::engine::Monitor;
use jellygate::telemetry::init_logging;

#[derive(Parser)]
#[command(
    name = "jellygate",
    about = "Pause SABnzbd when Jellyfin is playing (polling)"
)]
struct Cli {
    /// Jellyfin base URL (env: JELLYFIN_URL)
    #[arg(long)]
    jellyfin_url: Option<String>,
    /// Jellyfin API key (env: JELLYFIN_API_KEY)
    #[arg(long)]
    jellyfin_api_key: Option<String>,
    /// SABnzbd base URL (env: SAB_URL)
    #[arg(long)]
    sab_url: Option<String>,
    /// SABnzbd API key (env: SAB_API_KEY)
    #[arg(long)]
    sab_api_key: Option<String>,
    /// Poll interval in seconds (env: INTERVAL, default 30)
    #[arg(long)]
    interval: Option<u64>,
    /// Idle seconds before resuming downloads (env: RESUME_COOLDOWN, default 60)
    #[arg(long)]
    resume_cooldown: Option<u64>,
    /// Count paused/buffering sessions as active (env: INCLUDE_PAUSED)
    #[arg(long)]
    include_paused: bool,
    /// Disable TLS certificate verification (env: VERIFY_TLS)
    #[arg(long)]
    no_verify_tls: bool,
    /// Per-request timeout in seconds (env: REQUEST_TIMEOUT, default 8)
    #[arg(long)]
    request_timeout: Option<u64>,
    /// Log level when RUST_LOG is unset (env: LOG_LEVEL, default info)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_overrides(self) -> Overrides {
        Overrides {
            jellyfin_url: self.jellyfin_url,
            jellyfin_api_key: self.jellyfin_api_key,
            sab_url: self.sab_url,
            sab_api_key: self.sab_api_key,
            interval: self.interval,
            resume_cooldown: self.resume_cooldown,
            include_paused: self.include_paused.then_some(true),
            verify_tls: self.no_verify_tls.then_some(false),
            request_timeout: self.request_timeout,
            log_level: self.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let overrides = Cli::parse().into_overrides();

    let config = Config::resolve(&overrides)?;
    init_logging(&config.log_level)?;

    let mut monitor = Monitor::new(&config)?;
    let shutdown = monitor.shutdown_handle();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown.notify_one();
    });

    monitor.run().await?;
    Ok(())
}

/// Resolves on Ctrl-C or, on unix, SIGTERM (the container stop signal).
async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal as unix_signal};
        match unix_signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = signal::ctrl_c() => {}
                    _ = term.recv() => {}
                }
            }
            Err(_) => {
                signal::ctrl_c().await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.ok();
    }
}
