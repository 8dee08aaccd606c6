#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tracing::info;

mod cli;
use cli::{init_tracing_subscriber, Cli, Command};

mod fixture;
use fixture::Fixture;

mod inspect;
use inspect::BatchReport;

mod replay;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    let Cli { v, command } = Cli::parse();
    init_tracing_subscriber(v)?;

    let mut stdout = std::io::stdout();
    match command {
        Command::Replay(args) => {
            let fixture = Fixture::load(&args.fixture)?;
            let count = replay::replay(fixture, args.limit, &mut stdout).await?;
            info!(target: "replay", count, "Replay complete");
        }
        Command::Inspect { batch } => {
            let report = BatchReport::decode(&batch)?;
            serde_json::to_writer_pretty(&mut stdout, &report)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}
