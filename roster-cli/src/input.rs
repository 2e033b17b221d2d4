use anyhow::{Result, anyhow};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{error, info};

/// Source of follow-up answers for commands that ask questions
pub trait Prompt {
    /// Ask for one line. `None` means the user cancelled (Ctrl-C / Ctrl-D).
    fn ask(&mut self, label: &str) -> Result<Option<String>>;

    /// Show an informational line between questions
    fn say(&mut self, message: &str);

    /// Show a rejection before asking again
    fn warn(&mut self, message: &str);
}

/// Prompt backed by the interactive line editor
pub struct EditorPrompt<'a> {
    editor: &'a mut DefaultEditor,
}

impl<'a> EditorPrompt<'a> {
    pub fn new(editor: &'a mut DefaultEditor) -> Self {
        Self { editor }
    }
}

impl Prompt for EditorPrompt<'_> {
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        match self.editor.readline(label) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn say(&mut self, message: &str) {
        info!("{}", message);
    }

    fn warn(&mut self, message: &str) {
        error!("{}", message.red());
    }
}

/// Prompt for one-shot mode, where there is nobody to ask
pub struct NoPrompt;

impl Prompt for NoPrompt {
    fn ask(&mut self, label: &str) -> Result<Option<String>> {
        Err(anyhow!(
            "Interactive input required for '{}'; pass all arguments instead",
            label.trim().trim_end_matches(':')
        ))
    }

    fn say(&mut self, message: &str) {
        info!("{}", message);
    }

    fn warn(&mut self, message: &str) {
        error!("{}", message.red());
    }
}

/// Split a command line on whitespace, keeping double-quoted segments together
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        return Err(anyhow!("Unterminated quote in: {}", line));
    }
    if has_token {
        args.push(current);
    }

    Ok(args)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Prompt fed from a fixed list of answers
    #[derive(Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<String>,
        pub asked: Vec<String>,
        pub said: Vec<String>,
        pub warnings: Vec<String>,
    }

    impl ScriptedPrompt {
        pub fn new(answers: &[&str]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.to_string()).collect(),
                ..Self::default()
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn ask(&mut self, label: &str) -> Result<Option<String>> {
            self.asked.push(label.to_string());
            Ok(self.answers.pop_front())
        }

        fn say(&mut self, message: &str) {
            self.said.push(message.to_string());
        }

        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            split_args("  search   R1 ").unwrap(),
            vec!["search".to_string(), "R1".to_string()]
        );
        assert!(split_args("   ").unwrap().is_empty());
    }

    #[test]
    fn test_split_quoted_segments() {
        let args =
            split_args(r#"ADD "Alice Smith" R1 "Computer Science" 95 1234567890"#).unwrap();
        assert_eq!(
            args,
            vec![
                "ADD",
                "Alice Smith",
                "R1",
                "Computer Science",
                "95",
                "1234567890"
            ]
        );
    }

    #[test]
    fn test_split_empty_quotes_is_a_token() {
        assert_eq!(
            split_args(r#"UPDATE R1 dept """#).unwrap(),
            vec!["UPDATE", "R1", "dept", ""]
        );
    }

    #[test]
    fn test_split_unterminated_quote() {
        assert!(split_args(r#"ADD "Alice"#).is_err());
    }

    #[test]
    fn test_no_prompt_refuses() {
        let err = NoPrompt.ask("Name: ").unwrap_err();
        assert!(err.to_string().contains("'Name'"));
    }
}
