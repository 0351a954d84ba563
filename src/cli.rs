//! Command-line front end
//!
//! `industry-rank [OPTIONS] <SYMBOL>` runs one query and prints either the
//! text report or the JSON response. Exit codes: 0 on success, 1 when the
//! query failed, 2 when the tool could not start.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::application::{IndustryRankResponse, IndustryRankService, render_response};
use crate::domain::Ticker;
use crate::infrastructure::{AppConfig, ConfigManager, HttpClient, init_logging_with_config};

pub const EXIT_OK: i32 = 0;
pub const EXIT_QUERY_FAILED: i32 = 1;
pub const EXIT_STARTUP_ERROR: i32 = 2;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(
    name = "industry-rank",
    version,
    about = "Rank a ticker's industry against every industry group, per timeframe"
)]
pub struct Cli {
    /// Ticker or chart symbol (e.g. AAPL, NASDAQ:AAPL, NYSE-BRK.B).
    pub symbol: String,

    /// Use the symbol as typed instead of reducing it to its base ticker.
    #[arg(long, default_value_t = false)]
    pub raw: bool,

    /// Print the response object as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Configuration file. Defaults to the user config directory.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    /// Ticker to query; empty when nothing usable is left of the symbol
    pub fn query_ticker(&self) -> String {
        if self.raw {
            return self.symbol.clone();
        }
        Ticker::from_symbol(&self.symbol)
            .map(|ticker| ticker.to_string())
            .unwrap_or_default()
    }

    /// Command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(timeout) = self.timeout {
            config.http.timeout_seconds = timeout;
        }
        if let Some(level) = &self.log_level {
            config.logging.level.clone_from(level);
        }
    }
}

/// Run the command line and return the process exit code
pub async fn run(cli: Cli) -> i32 {
    match execute(&cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("industry-rank: {e:#}");
            EXIT_STARTUP_ERROR
        }
    }
}

async fn load_config(cli: &Cli) -> Result<AppConfig> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new()?,
    };
    let mut config = manager
        .load_config()
        .await
        .with_context(|| format!("Failed to load configuration from {:?}", manager.config_path()))?;
    cli.apply_overrides(&mut config);
    config.endpoints.validate()?;
    Ok(config)
}

async fn execute(cli: &Cli) -> Result<i32> {
    let config = load_config(cli).await?;
    init_logging_with_config(&config.logging)?;

    let client = HttpClient::new(&config.http)?;
    let service = IndustryRankService::new(client, config.endpoints.clone(), &config.parsing)
        .context("Invalid extraction pattern in configuration")?;

    let cancellation_token = CancellationToken::new();
    let interrupt = {
        let token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("🛑 Interrupted, cancelling query");
                token.cancel();
            }
        })
    };

    let ticker = cli.query_ticker();
    let outcome = service
        .get_industry_ranks_with_cancellation(&ticker, &cancellation_token)
        .await;
    interrupt.abort();

    let response = IndustryRankResponse::from(outcome);
    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&response).context("Failed to serialize response")?
        );
    } else {
        let label = if ticker.trim().is_empty() { cli.symbol.trim() } else { ticker.trim() };
        println!("{}", render_response(label, &response));
    }

    Ok(if response.is_ok() { EXIT_OK } else { EXIT_QUERY_FAILED })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use rstest::rstest;

    #[test]
    fn test_command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_all_options() {
        let cli = Cli::try_parse_from([
            "industry-rank",
            "NASDAQ:AAPL",
            "--json",
            "--config",
            "/tmp/rank.json",
            "--timeout",
            "5",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.symbol, "NASDAQ:AAPL");
        assert!(cli.json);
        assert!(!cli.raw);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/rank.json")));
        assert_eq!(cli.timeout, Some(5));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_symbol_is_required() {
        assert!(Cli::try_parse_from(["industry-rank"]).is_err());
    }

    #[rstest]
    #[case("NASDAQ:AAPL", false, "AAPL")]
    #[case("nyse-brk.b", false, "BRK.B")]
    #[case("123", false, "")]
    #[case(" msft ", true, " msft ")]
    fn test_query_ticker(#[case] symbol: &str, #[case] raw: bool, #[case] expected: &str) {
        let mut args = vec!["industry-rank", symbol];
        if raw {
            args.push("--raw");
        }
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.query_ticker(), expected);
    }

    #[test]
    fn test_overrides_replace_loaded_values() {
        let cli = Cli::try_parse_from(["industry-rank", "AAPL", "--timeout", "3", "--log-level", "trace"])
            .unwrap();
        let mut config = AppConfig::default();

        cli.apply_overrides(&mut config);

        assert_eq!(config.http.timeout_seconds, 3);
        assert_eq!(config.logging.level, "trace");
        assert_eq!(config.endpoints, AppConfig::default().endpoints);
    }
}
