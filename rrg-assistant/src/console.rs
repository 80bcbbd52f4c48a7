use std::io::{BufRead, Write};
use std::time::Duration;

use anyhow::Context;
use rrg_utils::diagnostics::Prompt;

/// Line-oriented terminal I/O. Generic over the streams so flows can be
/// driven from a script in tests.
pub struct Console<R, W> {
    input: R,
    output: W,
    pause: Duration,
    clear: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, pause: Duration, clear: bool) -> Self {
        Self {
            input,
            output,
            pause,
            clear,
        }
    }

    /// Reads one answer. `None` means the input is exhausted.
    pub fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> anyhow::Result<()> {
        writeln!(self.output, "{}", text.as_ref()).context("failed to write to stdout")
    }

    pub fn show(&mut self, prompt: &Prompt) -> anyhow::Result<()> {
        if let Some(heading) = &prompt.heading {
            self.say("")?;
            self.say(format!("=== {heading} ==="))?;
        }
        for line in &prompt.lines {
            self.say(line)?;
        }
        write!(self.output, "{} ", prompt.question).context("failed to write to stdout")?;
        self.output.flush().context("failed to flush stdout")
    }

    /// Gives the reader a moment between diagnostic tests.
    pub fn pause(&mut self) {
        if !self.pause.is_zero() {
            std::thread::sleep(self.pause);
        }
    }

    pub fn clear(&mut self) -> anyhow::Result<()> {
        if self.clear {
            write!(self.output, "\x1B[2J\x1B[1;1H").context("failed to clear the console")?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
