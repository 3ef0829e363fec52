//! `live-fire`: drive the list and suggested-user endpoints against a live
//! account or the fake API and report an aggregate pass/fail.
//!
//! ```text
//! live-fire --base-url http://127.0.0.1:3000/1.1/ --suite lists --tests 1,2,3
//! ```

mod suites;

use std::process::ExitCode;

use chirp_core::{ApiClient, ApiError, ClientConfig};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::suites::Plan;

/// live-fire: manual verification runner for chirp-core
///
/// Runs numbered steps sequentially, printing what each call returned. Exits 0
/// when every selected step passed, 1 otherwise.
#[derive(Parser)]
#[command(name = "live-fire", version, about, long_about = None)]
struct Cli {
    /// API base URL, e.g. `http://127.0.0.1:3000/1.1/`.
    #[arg(long, env = "CHIRP_API_BASE", value_name = "URL")]
    base_url: Option<String>,

    /// Bearer token sent with every request.
    #[arg(long, env = "CHIRP_BEARER_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Which group of steps to run.
    #[arg(long, value_enum, default_value_t = Suite::All)]
    suite: Suite,

    /// Comma-separated step numbers to run, e.g. `1,2,5`. All steps when omitted.
    #[arg(long, value_delimiter = ',', value_name = "STEPS")]
    tests: Vec<u32>,

    /// Account added to and removed from the scratch list.
    #[arg(long, default_value = "alice", value_name = "NAME")]
    screen_name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Suite {
    Lists,
    Suggested,
    All,
}

fn build_config(cli: &Cli) -> Result<ClientConfig, ApiError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base) = &cli.base_url {
        config.base_url = ClientConfig::with_base_url(base)?.base_url;
    }
    if let Some(token) = cli.token.as_deref().filter(|t| !t.trim().is_empty()) {
        config = config.bearer_token(token);
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("live_fire=info,chirp_core=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };
    tracing::info!(base_url = %config.base_url, suite = ?cli.suite, "starting run");

    let client = ApiClient::connect(config);
    let plan = Plan::new(cli.tests.clone(), cli.screen_name.clone());

    let mut passed = true;
    if matches!(cli.suite, Suite::Lists | Suite::All) {
        passed &= suites::lists(&client, &plan).await;
    }
    if matches!(cli.suite, Suite::Suggested | Suite::All) {
        passed &= suites::suggested(&client, &plan).await;
    }

    if passed {
        println!("PASS: all selected steps succeeded");
        ExitCode::SUCCESS
    } else {
        println!("FAIL: at least one step failed");
        ExitCode::FAILURE
    }
}
