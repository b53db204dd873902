use std::path::PathBuf;

use crate::high_score::{self, HighScoreStore};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct ShowHighScoreArg {
    /// File holding the high score
    #[clap(long, default_value = high_score::DEFAULT_PATH)]
    pub(crate) high_score_file: PathBuf,
}

pub(crate) fn run(arg: &ShowHighScoreArg) -> anyhow::Result<()> {
    let store = HighScoreStore::new(&arg.high_score_file);
    println!("{}", store.load()?);
    Ok(())
}
