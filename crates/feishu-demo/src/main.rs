//! # feishu-demo
//!
//! Walkthroughs of the Feishu / Lark open platform:
//! - **records**: CRUD and batch operations on an existing Bitable table
//! - **create**: a new Bitable app with a typed table, filled with sample rows
//! - **docs**, **styles**, **outline**: cloud documents and rich-text blocks
//! - **export**: copy a table's records into a report document

mod config;
mod error;
mod render;
mod scenarios;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::DemoConfig;
use crate::scenarios::Demo;

#[derive(Debug, Parser)]
#[command(name = "feishu-demo", version, about = "Feishu Bitable and Docx walkthroughs")]
struct Cli {
    /// YAML config file. Missing files fall back to defaults plus FEISHU_* env vars.
    #[arg(short, long, env = "FEISHU_CONFIG", default_value = "config.yaml")]
    config: PathBuf,

    #[command(subcommand)]
    scenario: Scenario,
}

#[derive(Debug, Clone, Copy, Subcommand)]
enum Scenario {
    /// Create, read, update, list, batch and delete records on the configured table
    Records,
    /// Create a new app and typed table, then fill it
    Create,
    /// Create a document, write to it and read it back
    Docs,
    /// Write paragraphs with inline styles, colours and links
    Styles,
    /// Write one of every block container
    Outline,
    /// Export the configured table into a new document
    Export,
}

impl Scenario {
    fn name(self) -> &'static str {
        match self {
            Scenario::Records => "records",
            Scenario::Create => "create",
            Scenario::Docs => "docs",
            Scenario::Styles => "styles",
            Scenario::Outline => "outline",
            Scenario::Export => "export",
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // -----------------------------------------------------------------------
    // 1. Initialize tracing (respects RUST_LOG env var)
    // -----------------------------------------------------------------------
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,feishu_demo=debug,feishu_client=info")),
        )
        .init();

    let cli = Cli::parse();
    info!(
        scenario = cli.scenario.name(),
        "Starting feishu-demo v{}",
        env!("CARGO_PKG_VERSION")
    );

    // -----------------------------------------------------------------------
    // 2. Load and validate configuration
    // -----------------------------------------------------------------------
    let config = DemoConfig::load(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    config
        .validate_credentials()
        .context("Fill in feishu.app_id and feishu.app_secret (or FEISHU_APP_ID / FEISHU_APP_SECRET)")?;
    info!(?config, "Loaded configuration");

    // -----------------------------------------------------------------------
    // 3. Run the scenario
    // -----------------------------------------------------------------------
    let demo = Demo::new(config)?;
    match cli.scenario {
        Scenario::Records => scenarios::records::run(&demo).await,
        Scenario::Create => scenarios::create::run(&demo).await,
        Scenario::Docs => scenarios::docs::run(&demo).await,
        Scenario::Styles => scenarios::styles::run(&demo).await,
        Scenario::Outline => scenarios::outline::run(&demo).await,
        Scenario::Export => scenarios::export::run(&demo).await,
    }
    .with_context(|| format!("Scenario {} failed", cli.scenario.name()))?;

    info!(scenario = cli.scenario.name(), "Scenario complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_scenario_and_config() {
        let cli = Cli::try_parse_from(["feishu-demo", "--config", "local.yaml", "export"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("local.yaml"));
        assert!(matches!(cli.scenario, Scenario::Export));
    }

    #[test]
    fn test_scenario_is_required() {
        assert!(Cli::try_parse_from(["feishu-demo"]).is_err());
    }
}
