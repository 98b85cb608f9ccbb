//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Lectern - Ask questions about a document and get answers grounded in it.
#[derive(Debug, Parser)]
#[command(name = "lectern")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "LECTERN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Model to ask (overrides the config file)
    #[arg(short, long, global = true)]
    pub model: Option<String>,

    /// Ollama endpoint (overrides the config file)
    #[arg(short, long, global = true, env = "LECTERN_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Skip the startup checks for Tesseract and Ollama
    #[arg(long, global = true)]
    pub skip_preflight: bool,

    /// More diagnostic output on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Upload a document and ask one question about it
    Ask(AskArgs),

    /// Print the text extracted from a document
    Extract(ExtractArgs),

    /// Enter interactive REPL mode
    Repl(ReplArgs),

    /// Inspect or create the configuration file
    Config(ConfigArgs),
}

/// Arguments for the ask command.
#[derive(Debug, Parser)]
pub struct AskArgs {
    /// Document to answer from (.png, .jpg, .jpeg, .pdf, .epub)
    #[arg(short, long)]
    pub file: PathBuf,

    /// Question about the document
    #[arg(required = true, num_args = 1..)]
    pub question: Vec<String>,

    /// Print only the answer
    #[arg(short, long)]
    pub quiet: bool,

    /// Print the audit log after the answer
    #[arg(long)]
    pub logs: bool,
}

impl AskArgs {
    /// Question words joined back into one string
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Document to read
    pub file: PathBuf,
}

/// Arguments for the repl command.
#[derive(Debug, Default, Parser)]
pub struct ReplArgs {
    /// Document to upload before the first prompt
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a configuration file with default values
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_repl() {
        let cli = Cli::parse_from(["lectern"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_ask_command() {
        let cli = Cli::parse_from([
            "lectern",
            "ask",
            "--file",
            "boiling.pdf",
            "At",
            "what",
            "temperature?",
        ]);
        match cli.command {
            Some(Command::Ask(args)) => {
                assert_eq!(args.file, PathBuf::from("boiling.pdf"));
                assert_eq!(args.question_text(), "At what temperature?");
                assert!(!args.quiet);
            }
            _ => panic!("Expected Ask command"),
        }
    }

    #[test]
    fn test_ask_requires_question() {
        let result = Cli::try_parse_from(["lectern", "ask", "--file", "a.pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "lectern",
            "extract",
            "scan.png",
            "--model",
            "llama2",
            "--no-color",
            "-vv",
        ]);
        assert_eq!(cli.model.as_deref(), Some("llama2"));
        assert!(cli.no_color);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Extract(_))));
    }

    #[test]
    fn test_config_init_force() {
        let cli = Cli::parse_from(["lectern", "config", "init", "--force"]);
        match cli.command {
            Some(Command::Config(ConfigArgs {
                action: ConfigAction::Init { force },
            })) => assert!(force),
            _ => panic!("Expected config init"),
        }
    }
}
