//! procsim binary entry point

use std::io;

use anyhow::Context;
use clap::Parser;

use procsim::{DeletePolicy, SessionConfig, Shell};

#[derive(Parser)]
#[command(name = "procsim")]
#[command(version, about = "Process table, ready queue and memory stack simulator", long_about = None)]
struct Cli {
    /// What deleting a process does to its queue entries and memory blocks
    #[arg(long, value_enum, default_value_t = DeletePolicy::Retain)]
    on_delete: DeletePolicy,

    /// Do not wait for Enter after each action
    #[arg(long)]
    no_pause: bool,

    /// Do not clear the screen after each action
    #[arg(long)]
    no_clear: bool,

    /// Trace operations on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = SessionConfig {
        delete_policy: cli.on_delete,
        pause: !cli.no_pause,
        clear_screen: !cli.no_clear,
        verbose: cli.verbose,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config);

    shell.run_to_end().context("session aborted")?;
    Ok(())
}
