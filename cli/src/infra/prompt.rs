//! Terminal implementation of the `OperatorPrompt` port.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use crate::application::ports::OperatorPrompt;

/// Prompts on the controlling terminal.
///
/// Selections are read line by line from stdin so the menu also works with
/// piped input.
pub struct TerminalPrompt {
    /// When `true` (CI, `--yes`, `STACKUP_YES`), confirmations return their default.
    pub non_interactive: bool,
}

impl TerminalPrompt {
    /// A prompt that always asks, whatever `--yes` or the environment say.
    #[must_use]
    pub const fn interactive() -> Self {
        Self {
            non_interactive: false,
        }
    }
}

impl OperatorPrompt for TerminalPrompt {
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        if self.non_interactive {
            return Ok(default);
        }
        let confirmed = dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(default)
            .interact()?;
        Ok(confirmed)
    }

    fn read_selection(&self, prompt: &str) -> Result<Option<String>> {
        let mut stdout = std::io::stdout();
        write!(stdout, "{prompt} ").context("writing prompt")?;
        stdout.flush().context("flushing prompt")?;

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .context("reading selection")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }
}
