use clap::{Parser, Subcommand};

use self::{difficulty::DifficultyArg, play::PlayArg};

mod difficulty;
mod play;

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
    /// Print the default difficulty table as JSON
    Difficulty(#[clap(flatten)] DifficultyArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Difficulty(arg) => difficulty::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_play_is_default_mode() {
        let args = CommandArgs::try_parse_from(["cascadris"]).unwrap();
        assert!(args.mode.is_none());

        let args = CommandArgs::try_parse_from(["cascadris", "play", "--width", "12"]).unwrap();
        assert!(matches!(args.mode, Some(Mode::Play(_))));
    }

    #[test]
    fn test_difficulty_mode() {
        let args =
            CommandArgs::try_parse_from(["cascadris", "difficulty", "--output", "table.json"])
                .unwrap();
        assert!(matches!(args.mode, Some(Mode::Difficulty(_))));
    }
}
