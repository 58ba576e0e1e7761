//! Interactive confirmation gate

use crate::error::Result;
use std::io::{BufRead, Write};

/// Prompt shown before a transfer is submitted
pub const CONFIRM_PROMPT: &str = "Proceed with transfer? (y/N): ";

/// Asks the user a yes/no question
pub trait Confirm {
    /// Show `prompt` and return whether the answer was affirmative
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// Reads a single answer line after writing the prompt to `output`.
///
/// The reader is opened by `input` for each question and dropped once the
/// answer is read, so `LinePrompt::new(|| io::stdin().lock(), ..)` leaves
/// stdin unlocked for later password prompts.
pub struct LinePrompt<F, W> {
    input: F,
    output: W,
}

impl<F, R, W> LinePrompt<F, W>
where
    F: FnMut() -> R,
    R: BufRead,
    W: Write,
{
    /// Create a prompt reading from the readers `input` opens
    pub fn new(input: F, output: W) -> Self {
        Self { input, output }
    }
}

impl<F, R, W> Confirm for LinePrompt<F, W>
where
    F: FnMut() -> R,
    R: BufRead,
    W: Write,
{
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        let read = (self.input)().read_line(&mut line)?;
        if read == 0 {
            // End of input
            return Ok(false);
        }
        Ok(is_affirmative(&line))
    }
}

/// Only a lone `y` (any case, surrounding whitespace ignored) counts as yes
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().to_lowercase() == "y"
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{
        cell::Cell,
        io::{Cursor, Read},
        rc::Rc,
    };

    /// Reader that flags whether it is still alive, standing in for a stdin lock
    pub(crate) struct TrackedReader {
        inner: Cursor<&'static str>,
        held: Rc<Cell<bool>>,
    }

    impl TrackedReader {
        pub(crate) fn open(answer: &'static str, held: &Rc<Cell<bool>>) -> Self {
            held.set(true);
            Self {
                inner: Cursor::new(answer),
                held: Rc::clone(held),
            }
        }
    }

    impl Read for TrackedReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.inner.read(buf)
        }
    }

    impl BufRead for TrackedReader {
        fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
            self.inner.fill_buf()
        }

        fn consume(&mut self, amt: usize) {
            self.inner.consume(amt)
        }
    }

    impl Drop for TrackedReader {
        fn drop(&mut self) {
            self.held.set(false);
        }
    }

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("y"));
        assert!(is_affirmative(" Y \n"));
        assert!(!is_affirmative("yes"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("\n"));
    }

    #[test]
    fn test_line_prompt_writes_prompt_and_reads_answer() {
        let mut output = Vec::new();
        let mut prompt = LinePrompt::new(|| Cursor::new("y\n"), &mut output);
        assert!(prompt.confirm(CONFIRM_PROMPT).unwrap());
        assert_eq!(String::from_utf8(output).unwrap(), CONFIRM_PROMPT);
    }

    #[test]
    fn test_line_prompt_only_reads_one_line() {
        let mut prompt = LinePrompt::new(|| Cursor::new("n\ny\n"), Vec::new());
        assert!(!prompt.confirm(CONFIRM_PROMPT).unwrap());
    }

    #[test]
    fn test_line_prompt_end_of_input_declines() {
        let mut prompt = LinePrompt::new(|| Cursor::new(""), Vec::new());
        assert!(!prompt.confirm(CONFIRM_PROMPT).unwrap());
    }

    #[test]
    fn test_line_prompt_releases_input_after_answer() {
        let held = Rc::new(Cell::new(false));
        let opened = Cell::new(0);
        let mut prompt = LinePrompt::new(
            || {
                opened.set(opened.get() + 1);
                TrackedReader::open("y\n", &held)
            },
            Vec::new(),
        );

        assert!(!held.get());
        assert!(prompt.confirm(CONFIRM_PROMPT).unwrap());
        assert!(!held.get());
        assert_eq!(opened.get(), 1);
    }
}
