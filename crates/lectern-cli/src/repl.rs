//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use lectern_domain::LlmProvider;
use lectern_pipeline::Session;
use rustyline::config::Config as EditorConfig;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fmt::Display;
use std::path::PathBuf;

/// Run the interactive REPL.
pub fn run_repl<P>(
    session: &mut Session<P>,
    formatter: &Formatter,
    history_size: usize,
) -> Result<()>
where
    P: LlmProvider,
    P::Error: Display,
{
    println!(
        "{}",
        formatter.info("Lectern REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    // Initialize readline editor
    let editor_config = EditorConfig::builder()
        .max_history_size(history_size)
        .map_err(|e| CliError::Readline(e.to_string()))?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config)
        .map_err(|e| CliError::Readline(format!("Failed to initialize editor: {}", e)))?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    loop {
        let prompt = if session.extracted_text().is_empty() {
            "lectern (no document)> "
        } else {
            "lectern> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(command) => execute_repl_command(command, session, formatter),
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
pub enum ReplCommand {
    /// Leave the REPL
    Exit,
    /// Show the command list
    Help,
    /// Replace the context with a document
    Upload(PathBuf),
    /// Ask about the current document
    Ask(String),
    /// Show the current context
    Context,
    /// Show the audit log
    Logs,
}

/// Parse a REPL command line.
///
/// Anything that is not a known command is treated as a question, including
/// lines that merely start with a keyword.
pub fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    match head {
        "" => Err(CliError::InvalidInput("Empty command".to_string())),
        // Keywords only count on their own; "quit smoking when?" is a question
        "exit" | "quit" | "q" if rest.is_empty() => Ok(ReplCommand::Exit),
        "help" | "?" if rest.is_empty() => Ok(ReplCommand::Help),
        "context" if rest.is_empty() => Ok(ReplCommand::Context),
        "logs" if rest.is_empty() => Ok(ReplCommand::Logs),
        "upload" | "open" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: upload <path>".to_string()));
            }
            Ok(ReplCommand::Upload(PathBuf::from(unquote(rest))))
        }
        "ask" => {
            if rest.is_empty() {
                return Err(CliError::InvalidInput("Usage: ask <question>".to_string()));
            }
            Ok(ReplCommand::Ask(rest.to_string()))
        }
        _ => Ok(ReplCommand::Ask(line.to_string())),
    }
}

/// Execute a REPL command.
fn execute_repl_command<P>(command: ReplCommand, session: &mut Session<P>, formatter: &Formatter)
where
    P: LlmProvider,
    P::Error: Display,
{
    match command {
        ReplCommand::Exit => {}
        ReplCommand::Help => print_help(formatter),
        ReplCommand::Upload(path) => {
            let outcome = session.upload(&path);
            println!("{}", formatter.upload(&outcome));
        }
        ReplCommand::Ask(question) => {
            let answer = session.ask(&question);
            println!("{}", formatter.answer(&answer));
        }
        ReplCommand::Context => {
            let text = session.extracted_text();
            if text.is_empty() {
                println!("{}", formatter.warning("No document text loaded"));
            } else {
                println!("{}", formatter.section("Extracted Text", text));
            }
        }
        ReplCommand::Logs => {
            println!("{}", formatter.section("Logs", &session.logs()));
        }
    }
}

/// Strip one pair of matching quotes around a path.
fn unquote(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|t| t.strip_suffix(quote))
        {
            return inner;
        }
    }
    text
}

fn get_history_path() -> Result<PathBuf> {
    let lectern_dir = Config::home()?;
    std::fs::create_dir_all(&lectern_dir)?;
    Ok(lectern_dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  upload <path>        - Extract a document (.png .jpg .jpeg .pdf .epub)");
    println!("  ask <question>       - Ask about the current document");
    println!("  <question>           - Same as ask");
    println!("  context              - Show the extracted text");
    println!("  logs                 - Show the audit log");
    println!("  help, ?              - Show this help");
    println!("  exit, quit, q        - Exit REPL");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_llm::MockProvider;

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_repl_command("exit").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("q").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command("?").unwrap(), ReplCommand::Help);
        assert_eq!(parse_repl_command("context").unwrap(), ReplCommand::Context);
        assert_eq!(parse_repl_command("  logs  ").unwrap(), ReplCommand::Logs);
    }

    #[test]
    fn test_parse_upload() {
        assert_eq!(
            parse_repl_command("upload ~/docs/My Book.epub").unwrap(),
            ReplCommand::Upload(PathBuf::from("~/docs/My Book.epub"))
        );
        assert_eq!(
            parse_repl_command("upload \"scan 1.png\"").unwrap(),
            ReplCommand::Upload(PathBuf::from("scan 1.png"))
        );
        assert!(parse_repl_command("upload").is_err());
    }

    #[test]
    fn test_parse_questions() {
        assert_eq!(
            parse_repl_command("ask  When was it written?").unwrap(),
            ReplCommand::Ask("When was it written?".to_string())
        );
        assert_eq!(
            parse_repl_command("Who is the author?").unwrap(),
            ReplCommand::Ask("Who is the author?".to_string())
        );
        assert!(parse_repl_command("ask").is_err());
        assert!(parse_repl_command("   ").is_err());
    }

    #[test]
    fn test_keyword_led_questions_are_asked() {
        assert_eq!(
            parse_repl_command("quit smoking when?").unwrap(),
            ReplCommand::Ask("quit smoking when?".to_string())
        );
        assert_eq!(
            parse_repl_command("context of chapter two?").unwrap(),
            ReplCommand::Ask("context of chapter two?".to_string())
        );
        assert_eq!(
            parse_repl_command("help  me understand page 3").unwrap(),
            ReplCommand::Ask("help  me understand page 3".to_string())
        );
    }

    #[test]
    fn test_execute_ask_without_document() {
        let provider = MockProvider::new("unused");
        let mut session = Session::new(provider.clone());

        execute_repl_command(
            ReplCommand::Ask("anything".to_string()),
            &mut session,
            &Formatter::new(false),
        );

        assert_eq!(provider.call_count(), 0);
        assert_eq!(session.log_entries().len(), 1);
    }
}
