//! Validated line-oriented input

use std::io::Write;

use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

/// Errors that end a prompt
#[derive(Error, Debug)]
pub enum PromptError {
    /// Input reached end of file
    #[error("input closed")]
    Closed,

    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Prompt service over any line reader and output writer.
///
/// Validating prompts re-ask until the answer is acceptable; they only
/// fail when input is closed or unreadable.
pub struct Prompter<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Prompter<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(reader: R, out: W) -> Self {
        Self {
            lines: reader.lines(),
            out,
        }
    }

    /// Print a full line
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<(), PromptError> {
        writeln!(self.out, "{}", text.as_ref())?;
        self.out.flush()?;
        Ok(())
    }

    /// Show `prompt` and read one trimmed line
    pub async fn read_line(&mut self, prompt: &str) -> Result<String, PromptError> {
        write!(self.out, "{}", prompt)?;
        self.out.flush()?;

        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(PromptError::Closed),
        }
    }

    /// Read an integer greater than zero
    pub async fn positive_integer(&mut self, prompt: &str) -> Result<u64, PromptError> {
        loop {
            let line = self.read_line(prompt).await?;
            match line.parse::<i64>() {
                Ok(value) if value > 0 => return Ok(value as u64),
                Ok(_) => self.say("Please enter a positive integer.")?,
                Err(_) => self.say("Invalid input. Please enter a valid integer.")?,
            }
        }
    }

    /// Read a line with at least one non-whitespace character
    pub async fn non_empty_string(&mut self, prompt: &str) -> Result<String, PromptError> {
        loop {
            let line = self.read_line(prompt).await?;
            if !line.is_empty() {
                return Ok(line);
            }
            self.say("Input cannot be empty. Please try again.")?;
        }
    }

    /// Read an explicit yes or no
    pub async fn yes_no(&mut self, prompt: &str) -> Result<bool, PromptError> {
        loop {
            match self.read_line(prompt).await?.to_lowercase().as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => self.say("Invalid input. Please type 'yes' or 'no'.")?,
            }
        }
    }

    /// Read a confirmation where anything other than yes means no
    pub async fn confirm(&mut self, prompt: &str) -> Result<bool, PromptError> {
        Ok(self.read_line(prompt).await?.eq_ignore_ascii_case("yes"))
    }

    pub fn into_writer(self) -> W {
        self.out
    }
}
