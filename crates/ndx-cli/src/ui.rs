use makendx::core::models::identifiers::format_members;
use makendx::engine::prompt::Prompter;
use std::io::{self, BufRead, Write};

/// A [`Prompter`] talking to a human over a line-oriented reader and writer,
/// normally the locked stdin and stdout.
pub struct ConsolePrompter<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsolePrompter<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    #[cfg(test)]
    fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> Prompter for ConsolePrompter<R, W> {
    fn show(&mut self, label: &str, members: &[String]) -> io::Result<()> {
        writeln!(self.writer, "{}: {}", label, format_members(members))?;
        self.writer.flush()
    }

    fn notify(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", message)?;
        self.writer.flush()
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            writeln!(self.writer)?;
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
