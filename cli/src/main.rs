//! Hoardkeep CLI - drives the claim contract from the terminal.
//!
//! Reads one plea per stdin line and prints one claim record per line.
//! With an oracle endpoint configured the contract evaluates against it;
//! without one a cycling demo oracle answers instead, so the settlement
//! pipeline can be exercised offline.
//!
//! ```text
//! main() -> load config -> build oracle + local host -> HoardContract
//!             |
//!             v
//!     for each stdin line: claim_treasure_record -> stdout
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use tracing_subscriber::EnvFilter;

use hoardkeep_config::HoardConfig;
use hoardkeep_consensus::LocalHost;
use hoardkeep_engine::HoardContract;
use hoardkeep_oracle::{HttpOracle, Oracle, OracleError, ScriptedOracle};

/// Demo replies cycled through when no oracle endpoint is configured.
const DEMO_REPLIES: [&str; 3] = [
    r#"{"give_treasure": false, "amount": 0, "reasoning": "The dragon yawns at such a plain request."}"#,
    r#"{"give_treasure": true, "amount": 2, "reasoning": "A spark of wit earns a modest reward."}"#,
    r#"{"give_treasure": false, "amount": 0, "reasoning": "Threats only amuse an ancient wyrm."}"#,
];

struct CliArgs {
    config: Option<PathBuf>,
    stats: bool,
}

fn parse_args() -> Result<CliArgs> {
    let mut args = std::env::args().skip(1);
    let mut parsed = CliArgs {
        config: None,
        stats: false,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().context("--config requires a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--stats" => parsed.stats = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(parsed)
}

fn print_usage() {
    println!(
        "hoardkeep - treasure-hoard claim contract\n\n\
         Usage: hoardkeep [--config <path>] [--stats]\n\n\
         Reads one plea per stdin line and prints one claim record per line.\n\
         --config <path>  load configuration from <path>\n\
         --stats          also print a stats record after each claim"
    );
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::try_new("warn").expect("warn filter is valid"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();
}

/// Runtime oracle selection without boxing the evaluation future.
enum CliOracle {
    Http(HttpOracle),
    Demo(ScriptedOracle),
}

impl Oracle for CliOracle {
    async fn evaluate(&self, prompt: &str) -> Result<String, OracleError> {
        match self {
            CliOracle::Http(oracle) => oracle.evaluate(prompt).await,
            CliOracle::Demo(oracle) => oracle.evaluate(prompt).await,
        }
    }
}

fn build_oracle(config: &HoardConfig) -> Result<CliOracle> {
    match &config.oracle.endpoint {
        Some(endpoint) => {
            tracing::info!(endpoint, "using HTTP oracle");
            let oracle = HttpOracle::with_timeout(
                endpoint.clone(),
                Duration::from_secs(config.oracle.timeout_secs),
            )
            .context("building HTTP oracle client")?;
            Ok(CliOracle::Http(oracle))
        }
        None => {
            tracing::info!("no oracle endpoint configured, using offline demo oracle");
            Ok(CliOracle::Demo(ScriptedOracle::cycling(DEMO_REPLIES)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => HoardConfig::load(path)?,
        None => HoardConfig::load_or_default()?,
    };

    let oracle = build_oracle(&config)?;
    let mut contract = HoardContract::new(oracle, LocalHost::new(), config.hoard.initial_treasure);
    tracing::info!(
        treasure = contract.treasure_count(),
        "contract ready, awaiting pleas"
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading plea from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let record = contract
            .claim_treasure_record(&line)
            .await
            .context("settling claim")?;
        writeln!(stdout, "{record}").context("writing claim record")?;

        if args.stats {
            writeln!(stdout, "{}", contract.stats_record()).context("writing stats record")?;
        }
    }

    Ok(())
}
