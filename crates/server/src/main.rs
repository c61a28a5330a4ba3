use pumpwatch_server::{App, PumpwatchConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        r#"pumpwatch - pump-and-dump surveillance API

USAGE:
    pumpwatch [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    HOST                     Server host (default: 0.0.0.0)
    PORT                     Server port (default: 8000)
    PUMPWATCH_STRATEGY       Classifier: tiered or weighted (default: tiered)
    PUMPWATCH_SNAPSHOT       Snapshot file to load records from
    PUMPWATCH_REFRESH_SECS   Re-read the snapshot every N seconds
    RUST_LOG                 Log level filter

EXAMPLES:
    # Run with defaults
    pumpwatch

    # Load today's market snapshot and score it with the weighted strategy
    PUMPWATCH_SNAPSHOT=data/nepse_today.json PUMPWATCH_STRATEGY=weighted pumpwatch

    # Run with config file
    pumpwatch --config config/pumpwatch.json
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing; log records from the library crates are bridged in
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pumpwatch=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path);
            PumpwatchConfig::from_file(&path)?
        }
        None => {
            tracing::info!("Using default configuration");
            PumpwatchConfig::default()
        }
    }
    .with_env()?;

    tracing::info!("Strategy: {}", config.detection.strategy);
    tracing::info!("Alert capacity: {}", config.detection.alert_capacity);
    tracing::info!("Baselines: {}", config.baselines.len());
    tracing::info!("Available endpoints:");
    tracing::info!("  GET    /stocks?risk=&search=&sort_by=&limit=");
    tracing::info!("  GET    /stocks/suspicious");
    tracing::info!("  GET    /stocks/{{symbol}}");
    tracing::info!("  GET    /stats");
    tracing::info!("  POST   /refresh");
    tracing::info!("  PUT    /baselines/{{symbol}}");
    tracing::info!("  GET    /alerts, POST /alerts, DELETE /alerts/{{id}}");

    App::new(config).run().await
}
