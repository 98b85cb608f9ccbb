//! Ask command implementation.

use crate::cli::AskArgs;
use crate::error::Result;
use crate::output::Formatter;
use lectern_domain::LlmProvider;
use lectern_pipeline::Session;
use std::fmt::Display;

/// Execute the ask command: upload once, answer once.
pub fn execute_ask<P>(args: AskArgs, session: &mut Session<P>, formatter: &Formatter) -> Result<()>
where
    P: LlmProvider,
    P::Error: Display,
{
    let outcome = session.upload(&args.file);
    if !args.quiet {
        println!("{}", formatter.upload(&outcome));
        println!();
    }

    let answer = session.ask(&args.question_text());
    if args.quiet {
        println!("{}", formatter.answer(&answer));
    } else {
        println!("{}", formatter.section("Answer", &formatter.answer(&answer)));
    }

    if args.logs {
        println!();
        println!("{}", formatter.section("Logs", &session.logs()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lectern_llm::MockProvider;
    use std::path::PathBuf;

    #[test]
    fn test_unsupported_file_still_answers() {
        let provider = MockProvider::new("unused");
        let mut session = Session::new(provider.clone());
        let args = AskArgs {
            file: PathBuf::from("notes.docx"),
            question: vec!["what?".to_string()],
            quiet: true,
            logs: true,
        };

        execute_ask(args, &mut session, &Formatter::new(false)).unwrap();

        assert_eq!(provider.call_count(), 0);
        assert_eq!(session.log_entries().len(), 2);
    }
}
