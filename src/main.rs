use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use log::{error, info};
use tokio::signal;
use topsum::{Config, Pipeline};

/// Periodically generates random batches, sums their top values and reports the total.
///
/// `N` (generate interval, ms), `M` (workers) and `K` (report interval, s) are read from
/// the environment, optionally populated from an env file.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// File to load `N`, `M` and `K` from. Defaults to `.env` when it exists.
    #[arg(long, env = "TOPSUM_ENV_FILE")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match Config::load(args.env_file.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {}", err);
            std::process::exit(1);
        }
    };

    let pipeline = Pipeline::new(config).spawn();
    signal::ctrl_c().await?;
    info!("Interrupted");
    pipeline.stop().await;
    Ok(())
}
