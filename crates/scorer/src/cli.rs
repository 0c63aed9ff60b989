use crate::{decollision, features, report, scoring};
use anyhow::{bail, Context, Result};
use common::config::Config;
use common::dataset;
use common::types::num_or_zero;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run,
    Wallet { address: String },
    Summary,
}

pub fn parse_args<I>(mut args: I) -> std::result::Result<Command, String>
where
    I: Iterator<Item = String>,
{
    // Drop argv[0].
    let _ = args.next();

    let Some(cmd) = args.next() else {
        return Ok(Command::Run);
    };

    match cmd.as_str() {
        "run" => Ok(Command::Run),
        "wallet" => {
            let address = args
                .next()
                .ok_or_else(|| "usage: scorer wallet <address>".to_string())?;
            Ok(Command::Wallet { address })
        }
        "summary" => Ok(Command::Summary),
        other => Err(format!("unknown command: {other}")),
    }
}

pub fn run_command(cfg: &Config, cmd: Command) -> Result<()> {
    match cmd {
        Command::Run => run_pipeline(cfg),
        Command::Wallet { address } => show_wallet(cfg, &address),
        Command::Summary => show_summary(cfg),
    }
}

/// The full batch pipeline: dataset -> features -> scores -> de-collision
/// -> CSV + summary. De-collision runs exactly once per execution.
pub fn run_pipeline(cfg: &Config) -> Result<()> {
    let dataset = dataset::load(Path::new(&cfg.scoring.transactions_path))?;
    tracing::info!(wallets = dataset.len(), "dataset loaded");

    let features = features::extract_all(&dataset);
    let mut rows = scoring::score_all(&features);
    decollision::spread_scores(&mut rows);

    let out_path = Path::new(&cfg.scoring.output_csv);
    report::write_scores_csv(out_path, &rows)?;
    tracing::info!(
        rows = rows.len(),
        path = %cfg.scoring.output_csv,
        "scores written"
    );

    report::print_summary(&report::summarize(&rows));
    Ok(())
}

fn show_wallet(cfg: &Config, address: &str) -> Result<()> {
    let dataset = dataset::load(Path::new(&cfg.scoring.transactions_path))?;
    let Some(txns) = dataset.get(address) else {
        bail!("wallet {address} not in dataset");
    };

    let f = features::compute_wallet_features(address, txns);
    let total_gas: f64 = txns.iter().map(|t| num_or_zero(t.gas_used.as_deref())).sum();

    println!("Wallet: {address}");
    println!("  tx_count={}", f.tx_count);
    println!("  total_value_eth={:.6}", f.total_value_eth);
    println!("  avg_value_eth={:.6}", f.avg_value_eth);
    println!("  unique_recipients={}", f.unique_recipients);
    println!("  unique_methods={}", f.unique_methods);
    println!("  failed_count={}", f.failed_count);
    println!("  success_rate={:.3}", f.success_rate);
    println!("  total_gas_used={total_gas}");
    println!("  raw_score={}", scoring::compute_score(&f));
    Ok(())
}

fn show_summary(cfg: &Config) -> Result<()> {
    let path = Path::new(&cfg.scoring.output_csv);
    let rows = report::read_scores_csv(path)
        .with_context(|| format!("no scores at {}; run the pipeline first", path.display()))?;
    report::print_summary(&report::summarize(&rows));
    Ok(())
}
