//! Line-oriented answer input.

use std::io::{self, BufRead, Write};

/// Source of user answers: shows a prompt and blocks until text is supplied.
pub trait AnswerSource {
    fn prompt_and_read(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads one line per prompt from a buffered reader, writing prompts to `output`.
pub struct LineAnswers<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineAnswers<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Consume the source, returning the prompt writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> AnswerSource for LineAnswers<R, W> {
    fn prompt_and_read(&mut self, prompt: &str) -> io::Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed while waiting for an answer",
            ));
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }
}

/// Whether a response accepts a suggestion: empty, `y` or `Y`.
pub fn is_confirmation(response: &str) -> bool {
    matches!(response.trim(), "" | "y" | "Y")
}
