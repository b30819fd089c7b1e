use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use pactdraft::app::App;
use pactdraft::config::Config;
use pactdraft::logging;

#[derive(Parser)]
#[command(name = "pactdraft")]
#[command(about = "Terminal wizard for drafting contractor agreements")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Write the completed draft JSON to this file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;
    let logging_handle = logging::init_logging(&config, cli.debug)?;

    let mut app = App::new(config.clone());
    let outcome = app.run().await?;

    // Terminal is restored at this point; stdout is safe again
    if let Some(draft) = outcome {
        let json = if cli.compact || !config.output.pretty {
            serde_json::to_string(&draft)?
        } else {
            serde_json::to_string_pretty(&draft)?
        };
        println!("{json}");

        let output_path = cli
            .output
            .or_else(|| config.output.path.clone().map(PathBuf::from));
        if let Some(path) = output_path {
            std::fs::write(&path, format!("{json}\n"))
                .with_context(|| format!("Failed to write draft to {}", path.display()))?;
            eprintln!("Draft written to {}", path.display());
        }
    }

    // Print log file path on exit if logs were written
    if let Some(log_path) = logging_handle.log_file_path {
        if log_path.exists() {
            if let Ok(metadata) = log_path.metadata() {
                if metadata.len() > 0 {
                    eprintln!("Session log: {}", log_path.display());
                }
            }
        }
    }

    Ok(())
}
