//! This module contains all CLI-specific code for the replay binary.

use alloy_primitives::{hex, Bytes};
use anyhow::{anyhow, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

/// The replay binary CLI application arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub(crate) struct Cli {
    /// Verbosity level (0-4)
    #[arg(
        long,
        short,
        global = true,
        help = "Verbosity level (0 [error] - 4 [trace]) - Default: 0 [error]",
        action = ArgAction::Count
    )]
    pub(crate) v: u8,
    /// The command to run.
    #[command(subcommand)]
    pub(crate) command: Command,
}

/// The subcommands of the replay binary.
#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Replays a fixture through the inbox multiplexer, printing each message as a JSON line.
    Replay(ReplayArgs),
    /// Decodes a single sequencer batch and prints its header and segments.
    Inspect {
        /// The hex encoded batch, as posted to the sequencer inbox.
        #[arg(value_parser = parse_bytes)]
        batch: Bytes,
    },
}

/// Arguments of the `replay` subcommand.
#[derive(Args, Debug)]
pub(crate) struct ReplayArgs {
    /// Path to the JSON fixture holding both inboxes.
    #[arg(long, env = "ARB_REPLAY_FIXTURE")]
    pub(crate) fixture: PathBuf,
    /// Stop after this many messages. Without a limit, replay runs until the batches run out.
    #[arg(long)]
    pub(crate) limit: Option<usize>,
}

/// Parse a string slice into [Bytes].
pub(crate) fn parse_bytes(s: &str) -> Result<Bytes, String> {
    hex::decode(s).map_err(|e| format!("Invalid hex string: {e}")).map(Bytes::from)
}

/// Initializes the tracing subscriber
///
/// # Arguments
/// * `verbosity_level` - The verbosity level (0-4)
///
/// # Returns
/// * `Result<()>` - Ok if successful, Err otherwise.
pub(crate) fn init_tracing_subscriber(verbosity_level: u8) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(match verbosity_level {
            0 => Level::ERROR,
            1 => Level::WARN,
            2 => Level::INFO,
            3 => Level::DEBUG,
            _ => Level::TRACE,
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber).map_err(|e| anyhow!(e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from(["arb-replay", "-vv", "replay", "--fixture", "inbox.json"])
            .unwrap();
        assert_eq!(cli.v, 2);
        match cli.command {
            Command::Replay(args) => {
                assert_eq!(args.fixture, PathBuf::from("inbox.json"));
                assert_eq!(args.limit, None);
            }
            Command::Inspect { .. } => panic!("expected replay"),
        }

        let cli = Cli::try_parse_from([
            "arb-replay",
            "replay",
            "--fixture",
            "inbox.json",
            "--limit",
            "3",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.v, 1);
        assert!(matches!(cli.command, Command::Replay(ReplayArgs { limit: Some(3), .. })));
    }

    #[test]
    fn test_parse_inspect() {
        let cli = Cli::try_parse_from(["arb-replay", "inspect", "0x00ff"]).unwrap();
        match cli.command {
            Command::Inspect { batch } => assert_eq!(batch, Bytes::from_static(&[0x00, 0xff])),
            Command::Replay(_) => panic!("expected inspect"),
        }
        assert!(Cli::try_parse_from(["arb-replay", "inspect", "0xzz"]).is_err());
    }

    #[test]
    fn test_parse_requires_command() {
        assert!(Cli::try_parse_from(["arb-replay"]).is_err());
        assert!(Cli::try_parse_from(["arb-replay", "inspect"]).is_err());
    }
}
