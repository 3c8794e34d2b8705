//! `parche apply` - run a patch stream against a headless graph.

use std::fs;
use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use parche_core::{Patch, PatchEngine};

use crate::trace_backend::TraceBackend;

/// Arguments for the `apply` subcommand.
#[derive(Args)]
pub struct ApplyArgs {
    /// Patch stream as JSON Lines, one tagged patch per line ("-" = stdin)
    pub input: PathBuf,

    /// Pretty-print the resulting graph snapshot
    #[arg(long)]
    pub pretty: bool,
}

pub fn run(args: ApplyArgs) -> anyhow::Result<()> {
    let text = if args.input.to_str() == Some("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read patch stream from stdin")?;
        buf
    } else {
        fs::read_to_string(&args.input)
            .with_context(|| format!("failed to read patch stream from {:?}", args.input))?
    };

    let mut patches = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let patch: Patch = serde_json::from_str(line)
            .with_context(|| format!("malformed patch on line {}", line_no + 1))?;
        patches.push(patch);
    }
    tracing::info!(count = patches.len(), "parsed patch stream");

    let mut engine = PatchEngine::new(TraceBackend::new());
    let applied = engine
        .apply_batch(patches)
        .context("patch stream aborted; earlier patches remain applied")?;

    tracing::info!(
        applied,
        nodes = engine.node_count(),
        edges = engine.edge_count(),
        runtime_calls = engine.backend().calls(),
        "patch stream applied"
    );

    let snapshot = engine.snapshot();
    let json = if args.pretty {
        serde_json::to_string_pretty(&snapshot)?
    } else {
        serde_json::to_string(&snapshot)?
    };
    println!("{json}");

    Ok(())
}
