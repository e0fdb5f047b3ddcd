use clap::{Parser, Subcommand};

use self::{dump_params::DumpParamsArg, extract::ExtractArg, summarize::SummarizeArg};

mod dump_params;
mod extract;
mod summarize;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Extract spatial features for all samples of one data source
    Extract(#[clap(flatten)] ExtractArg),
    /// Report per-game sample counts for a feature table
    Summarize(#[clap(flatten)] SummarizeArg),
    /// Print the built-in statistic parameter table as JSON
    DumpParams(#[clap(flatten)] DumpParamsArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Extract(arg) => extract::run(&arg)?,
        Mode::Summarize(arg) => summarize::run(&arg)?,
        Mode::DumpParams(arg) => dump_params::run(&arg)?,
    }
    Ok(())
}
