use std::path::PathBuf;

use spategt_analysis::params::StatisticCatalog;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DumpParamsArg {
    /// Output file path (stdout if omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DumpParamsArg) -> anyhow::Result<()> {
    Output::save_json(&StatisticCatalog::builtin(), arg.output.clone())
}
