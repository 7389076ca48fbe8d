use std::path::PathBuf;

use cascadris_engine::DifficultyTable;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct DifficultyArg {
    /// Output file path (defaults to stdout)
    #[clap(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &DifficultyArg) -> anyhow::Result<()> {
    let DifficultyArg { output } = arg;
    Output::save_json(&DifficultyTable::default(), output.clone())
}
