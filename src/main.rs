use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cloudflare_ddns::{
    config::{Settings, DEFAULT_CONFIG_FILE},
    reconcile::{Reconciler, StatusMessage},
};

#[derive(Parser)]
#[command(name = "cloudflare-ddns")]
#[command(about = "Keeps Cloudflare A records pointed at the current public IPv4 address")]
#[command(version)]
struct Cli {
    /// Configuration file (.json or .toml)
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Update every record that does not match the current IP (default)
    Update,

    /// Show what would change without updating or notifying
    Check,

    /// Show configuration file location and contents
    Config,
}

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match cli.command.unwrap_or(Commands::Update) {
        Commands::Update => run(&cli.config, false).await,
        Commands::Check => run(&cli.config, true).await,
        Commands::Config => match show_config(&cli.config) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{:#}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(config: &Path, dry_run: bool) -> ExitCode {
    // Config problems are reported but never sent to the webhook
    let reconciler = match Settings::load(config).and_then(|s| Reconciler::from_settings(&s)) {
        Ok(reconciler) => reconciler,
        Err(e) => {
            println!("{}", StatusMessage::failure(&e));
            return ExitCode::FAILURE;
        }
    };

    let result = if dry_run {
        reconciler.check().await.map_err(|e| {
            println!("{}", StatusMessage::failure(&e));
            e
        })
    } else {
        reconciler.run().await
    };

    match result {
        Ok(outcomes) => {
            info!("Finished, {} record(s) processed", outcomes.len());
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::FAILURE,
    }
}

fn show_config(path: &Path) -> Result<()> {
    let display_path = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    println!("Configuration file location: {}\n", display_path.display());

    match Settings::load(path) {
        Ok(mut settings) => {
            settings.api_token = "<redacted>".to_string();
            println!("Current configuration:\n");
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        Err(e) => {
            println!("{}", e);
            println!("\nExample configuration:\n");
            println!(
                r#"{{
  "DNS_RECORDS": ["example.com", "home.example.com"],
  "CLOUDFLARE_ZONE_ID": "your-zone-id",
  "CLOUDFLARE_ZONE_API_TOKEN": "your-api-token",
  "DISCORD_WEBHOOK_URL": ""
}}"#
            );
        }
    }

    Ok(())
}
