use clap::{Parser, Subcommand};

use self::{play::PlayArg, show_high_score::ShowHighScoreArg};

mod play;
mod show_high_score;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play in the terminal (default)
    Play(#[clap(flatten)] PlayArg),
    /// Print the stored high score
    ShowHighScore(#[clap(flatten)] ShowHighScoreArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::ShowHighScore(arg) => show_high_score::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_play() {
        let args = CommandArgs::try_parse_from(["blockfall"]).unwrap();
        assert!(args.mode.is_none());
    }

    #[test]
    fn test_show_high_score_path() {
        let args = CommandArgs::try_parse_from([
            "blockfall",
            "show-high-score",
            "--high-score-file",
            "scores.json",
        ])
        .unwrap();
        let Some(Mode::ShowHighScore(arg)) = args.mode else {
            panic!("expected show-high-score, got {:?}", args.mode);
        };
        assert_eq!(arg.high_score_file, PathBuf::from("scores.json"));
    }
}
