use clap::{Parser, Subcommand};

use self::{process::ProcessArg, summarize::SummarizeArg};

mod process;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log debug diagnostics (`RUST_LOG` overrides)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Extract per-player decision times from archived battle logs
    Process(#[clap(flatten)] ProcessArg),
    /// Print statistics and derived series for a processed dataset
    Summarize(#[clap(flatten)] SummarizeArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    crate::util::init_logging(args.verbose);
    match args.mode {
        Mode::Process(arg) => process::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
    }
    Ok(())
}
