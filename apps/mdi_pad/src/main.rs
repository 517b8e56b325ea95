use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use mdi_core::{CodeCatalog, EntrySession};
use shared::domain::AxisMask;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod backend_bridge;
mod config;
mod controller;

use backend_bridge::commands::BackendCommand;
use config::load_settings;
use controller::{
    events::{tokens, TokenOutcome},
    orchestration::{apply_token, QueuedController},
};

/// Compose MDI commands from keypad tokens.
///
/// Tokens: digits, `.`, `-`, `clear`, `back`, `next`, `ok`, `g`, `m`,
/// `sel:N`, or any single character key.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    #[arg(long, default_value = "mdi.toml")]
    config: PathBuf,
    /// Overrides the configured axis mask (decimal, 0x.. or 0b..).
    #[arg(long, value_parser = parse_mask)]
    axis_mask: Option<AxisMask>,
    /// Print session snapshots as JSON instead of a text line.
    #[arg(long)]
    json: bool,
    /// Tokens to feed; stdin is read when none are given.
    tokens: Vec<String>,
}

fn parse_mask(raw: &str) -> Result<AxisMask, String> {
    AxisMask::parse(raw).ok_or_else(|| format!("invalid axis mask '{raw}'"))
}

fn report(
    out: &mut impl Write,
    session: &EntrySession<QueuedController>,
    outcome: &TokenOutcome,
    json: bool,
) -> Result<()> {
    if let Some(line) = outcome.status_line() {
        writeln!(out, "{line}")?;
    }
    let snapshot = session.snapshot();
    if json {
        writeln!(out, "{}", serde_json::to_string(&snapshot)?)?;
    } else {
        writeln!(out, "{}", snapshot.render_line())?;
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let mut settings = load_settings(&args.config);
    if let Some(mask) = args.axis_mask {
        settings.axis_mask = mask;
    }

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(settings.queue_capacity);
    let worker = backend_bridge::runtime::launch(cmd_rx, io::stdout());

    let controller = QueuedController::new(cmd_tx, settings.axis_mask);
    let mut session = EntrySession::new(CodeCatalog::standard(), controller, settings.default_family);
    info!(axes = %session.axis_letters(), family = %settings.default_family, "keypad ready");

    // Not locked for the whole run: the worker echoes to stdout too.
    let mut out = io::stdout();
    let mut failures = 0usize;
    let mut feed = |token: &str| -> Result<()> {
        let outcome = apply_token(&mut session, token);
        if outcome.is_failure() {
            failures += 1;
        }
        report(&mut out, &session, &outcome, args.json)
    };

    if args.tokens.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read keypad input")?;
            for token in tokens(&line) {
                feed(token)?;
            }
        }
    } else {
        for token in args.tokens.iter().flat_map(|arg| tokens(arg)) {
            feed(token)?;
        }
    }
    drop(feed);

    // Dropping the session closes the queue so the worker can finish.
    drop(session);
    let sent = worker
        .join()
        .map_err(|_| anyhow::anyhow!("machine worker panicked"))?;
    info!(sent, failures, "keypad session finished");
    Ok(())
}
