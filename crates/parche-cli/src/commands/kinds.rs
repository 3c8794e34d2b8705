//! `parche kinds` - list supported node kinds.

use clap::Args;
use parche_core::NodeKind;

/// Arguments for the `kinds` subcommand.
#[derive(Args)]
pub struct KindsArgs {
    /// Show control parameter defaults
    #[arg(long)]
    pub verbose: bool,
}

pub fn run(args: KindsArgs) -> anyhow::Result<()> {
    println!("Supported node kinds:\n");
    for kind in NodeKind::ALL {
        let profile = kind.profile();
        let mut traits = Vec::new();
        if profile.self_starting {
            traits.push("self-starting");
        }
        if profile.stoppable {
            traits.push("stoppable");
        }
        let suffix = if traits.is_empty() {
            String::new()
        } else {
            format!("  [{}]", traits.join(", "))
        };
        println!("  {}{}", kind.type_name(), suffix);

        if args.verbose {
            if profile.controls.is_empty() {
                println!("      (no control parameters)");
            }
            for control in profile.controls {
                println!("      {} = {}", control.name, control.default);
            }
        }
    }
    println!("\nAnything else degrades to a passthrough GainNode with a warning.");
    Ok(())
}
