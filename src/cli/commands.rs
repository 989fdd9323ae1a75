use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tick", about = concat!("[x] tick v", env!("CARGO_PKG_VERSION"), " - a small todo list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read configuration from this file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Use this data file instead of the configured one
    #[arg(long = "data-file", global = true)]
    pub data_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List todos
    List(ListArgs),
    /// Add a todo
    Add(AddArgs),
    /// Toggle a todo between active and completed
    Done(IdArgs),
    /// Delete a todo
    Rm(IdArgs),
    /// Delete every completed todo
    ClearCompleted,
}

#[derive(Args)]
pub struct ListArgs {
    /// Which todos to show (all, active, completed)
    #[arg(long, default_value = "all")]
    pub filter: String,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct AddArgs {
    /// Todo text (words are joined with spaces)
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

#[derive(Args)]
pub struct IdArgs {
    /// Todo id, or a unique prefix of it
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["tick", "list", "--data-file", "/tmp/t.json"]).unwrap();
        assert_eq!(cli.data_file, Some(PathBuf::from("/tmp/t.json")));
        assert!(matches!(cli.command, Some(Commands::List(_))));
    }

    #[test]
    fn add_joins_words() {
        let cli = Cli::try_parse_from(["tick", "add", "buy", "milk"]).unwrap();
        match cli.command {
            Some(Commands::Add(args)) => assert_eq!(args.text.join(" "), "buy milk"),
            _ => panic!("expected add"),
        }
    }

    #[test]
    fn no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["tick"]).unwrap();
        assert!(cli.command.is_none());
    }
}
