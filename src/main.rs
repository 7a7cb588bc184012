use clap::Parser;
use anyhow::Result;
use tracing::{info, warn};

use rinha_fetch::cli::{Cli, Commands};
use rinha_fetch::config::Config;
use rinha_fetch::downloader;

#[tokio::main]
async fn main() -> Result<()> {
    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "rinha_fetch=info");
    }

    // Initialize logging to both console and file
    use tracing_subscriber::{fmt, EnvFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let file_appender = tracing_appender::rolling::never(".", "rinha-fetch.log");

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::from_default_env())
        )
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_filter(EnvFilter::from_default_env())
        )
        .init();

    let cli = Cli::parse();

    match cli.into_command() {
        Commands::Download { output, workers } => {
            let config = Config::from_env()?.with_overrides(output, workers);
            config.validate()?;

            // A listing failure propagates and exits non-zero; fetch failures do not.
            let summary = downloader::download_all(&config).await?;
            if summary.failed() > 0 {
                warn!("{} of {} files failed to download", summary.failed(), summary.listed);
            } else {
                info!("Successfully downloaded {} files", summary.succeeded());
            }
        }

        Commands::List => {
            let config = Config::from_env()?;
            config.validate()?;

            let listing = downloader::list_only(&config).await?;
            for name in listing.names() {
                println!("{}", name);
            }
        }
    }

    Ok(())
}
