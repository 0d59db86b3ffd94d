use crate::core::models::identifiers::format_members;
use std::collections::VecDeque;
use std::io::{self, BufRead};

/// Request/response channel between the selection engine and an operator.
///
/// The engine never touches a terminal directly: it shows sets and messages through
/// this trait and asks for one line at a time. Console, scripted-file and test
/// implementations are interchangeable.
pub trait Prompter {
    /// Displays a labelled identifier listing. `members` is already in natural order.
    fn show(&mut self, label: &str, members: &[String]) -> io::Result<()>;

    /// Displays an informational or error message.
    fn notify(&mut self, message: &str) -> io::Result<()>;

    /// Requests one line of input. Returns `Ok(None)` once input is exhausted.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// A prompter answering from a fixed list of responses and recording everything shown.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompter {
    responses: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, T>(responses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            responses: responses.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Uses every line of `reader` as one response.
    pub fn from_reader(reader: impl BufRead) -> io::Result<Self> {
        let responses = reader.lines().collect::<io::Result<Vec<_>>>()?;
        Ok(Self::new(responses))
    }

    /// Everything shown, notified or asked so far, one entry per call.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn remaining(&self) -> usize {
        self.responses.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn show(&mut self, label: &str, members: &[String]) -> io::Result<()> {
        self.transcript
            .push(format!("{}: {}", label, format_members(members)));
        Ok(())
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.responses.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn ask_returns_responses_in_order_then_none() {
        let mut prompter = ScriptedPrompter::new(["SOL", "done"]);
        assert_eq!(prompter.ask("first > ").unwrap().as_deref(), Some("SOL"));
        assert_eq!(prompter.remaining(), 1);
        assert_eq!(prompter.ask("second > ").unwrap().as_deref(), Some("done"));
        assert_eq!(prompter.ask("third > ").unwrap(), None);
    }

    #[test]
    fn transcript_records_every_interaction() {
        let mut prompter = ScriptedPrompter::new(["x"]);
        prompter
            .show("Candidates", &["A".to_string(), "B".to_string()])
            .unwrap();
        prompter.notify("Invalid input.").unwrap();
        prompter.ask("Select > ").unwrap();

        assert_eq!(
            prompter.transcript(),
            &["Candidates: {A, B}", "Invalid input.", "Select > "]
        );
    }

    #[test]
    fn from_reader_uses_each_line_as_a_response() {
        let prompter = ScriptedPrompter::from_reader(Cursor::new("SOL\nd\n\nOW\n")).unwrap();
        assert_eq!(prompter.remaining(), 4);
    }
}
