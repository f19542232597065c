use bizbot_core::BizbotConfig;
use clap::Parser;
use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use bizbot_server::http::{self, AppState};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "bizbot.toml")]
    config: String,

    /// Validate configuration and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (dev convenience — production uses real env vars)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load config
    let config = match BizbotConfig::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", args.config, e);
            std::process::exit(1);
        }
    };

    // Init logging; RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    fmt().with_env_filter(filter).init();

    if args.check {
        println!("Provider base URL: {}", config.completion.base_url);
        println!("Model: {}", config.completion.model);
        if config.completion.resolved_api_key().is_empty() {
            println!("❌ No API key (set OPENAI_API_KEY or [completion].api_key)");
            std::process::exit(1);
        }
        println!("✅ API key present");
        if config.session.resolved_secret().is_none() {
            println!("⚠️  No session secret (SECRET_KEY); a random key will be used");
        }
        return Ok(());
    }

    let state = match AppState::from_config(config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialise completion provider: {}", e);
            std::process::exit(1);
        }
    };

    let (tx, rx) = broadcast::channel(1);

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            // Without a signal source, run until the process is killed.
            std::future::pending::<()>().await;
        }
        tracing::info!("Shutdown signal received");
        let _ = tx.send(());
    });

    http::start_http_server(state, rx).await?;

    Ok(())
}
