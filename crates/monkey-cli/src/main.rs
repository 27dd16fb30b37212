use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod config;
mod logging;

/// Monkey programming language interpreter.
///
/// Runs Monkey scripts, dumps their tokens and syntax trees, and hosts an
/// interactive REPL. Started without a subcommand, it opens the REPL.
///
/// EXAMPLES:
///     monkey run fib.mk          Run a Monkey program
///     monkey ast fib.mk --json   Print the syntax tree as JSON
///     monkey tokens fib.mk       List the tokens of a file
///     monkey                     Start interactive REPL
///
/// ENVIRONMENT VARIABLES:
///     MONKEY_DIAGNOSTICS   Set to 'json' for JSON diagnostics by default
///     MONKEY_HISTORY_FILE  REPL history location (default ~/.monkey/history)
///     MONKEY_NO_HISTORY    Set to disable REPL history
///     MONKEY_LOG           Tracing filter, e.g. 'monkey_runtime=trace'
#[derive(Parser)]
#[command(name = "monkey")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a Monkey source file
    ///
    /// Evaluates the file and prints the value of its last statement
    /// unless it is null.
    ///
    /// EXAMPLES:
    ///     monkey run main.mk           Run a program
    ///     monkey run main.mk --json    Output diagnostics as JSON
    #[command(visible_alias = "r")]
    Run {
        /// Path to the Monkey source file
        file: String,
        /// Output diagnostics in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive REPL
    ///
    /// REPL COMMANDS:
    ///     :help, :h        Show help
    ///     :quit, :q        Exit REPL
    ///     :reset           Clear all bindings
    ///     :tokens <src>    Show the tokens of a snippet
    ///     :vars            List bindings
    Repl {
        /// Disable history persistence
        #[arg(long)]
        no_history: bool,
    },

    /// Print the syntax tree of a file
    ///
    /// Prints the canonical, fully parenthesized form of each statement, or
    /// the versioned JSON tree with --json.
    Ast {
        /// Path to the Monkey source file
        file: String,
        /// Output the AST (and diagnostics) as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the tokens of a file, one per line
    Tokens {
        /// Path to the Monkey source file
        file: String,
    },
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let cli_config = config::Config::from_env();

    match cli.command {
        Some(Commands::Run { file, json }) => {
            // Command-line flag overrides environment variable
            let use_json = json || cli_config.default_json;
            commands::run::run(&file, use_json)?;
        }
        Some(Commands::Repl { no_history }) => {
            let disable_history = no_history || cli_config.no_history;
            commands::repl::run(disable_history, &cli_config)?;
        }
        Some(Commands::Ast { file, json }) => {
            let use_json = json || cli_config.default_json;
            commands::ast::run(&file, use_json)?;
        }
        Some(Commands::Tokens { file }) => {
            commands::tokens::run(&file)?;
        }
        None => {
            commands::repl::run(cli_config.no_history, &cli_config)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["monkey"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_run_alias() {
        let cli = Cli::try_parse_from(["monkey", "r", "main.mk", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Run { file, json }) => {
                assert_eq!(file, "main.mk");
                assert!(json);
            }
            _ => panic!("expected run command"),
        }
    }
}
