use molscout::Config;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Log to a file; stdout belongs to the TUI.
    let log_file = tracing_appender::rolling::never(std::env::temp_dir(), "molscout.log");
    let (writer, _guard) = tracing_appender::non_blocking(log_file);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "molscout=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();

    let config = Config::from_env()?;
    info!(?config, "configuration loaded");

    molscout::tui::run(config).await
}
