//! Terminal stylesheet (owo-colors).
//!
//! `Styles::default()` is the plain sheet used for `--no-color`, `NO_COLOR`
//! and non-TTY stdout; every style in it renders text unchanged.

use owo_colors::Style;

use crate::domain::ComponentStatus;

/// Styles for each kind of line stackup prints.
#[derive(Default, Clone, Copy)]
pub struct Styles {
    /// `✓` marks and "installed".
    pub ok: Style,
    /// `!` marks and recoverable problems.
    pub warn: Style,
    /// `✗` marks on stderr.
    pub fail: Style,
    /// `→` progress steps and `ℹ` notes.
    pub step: Style,
    /// Paths and absent components.
    pub muted: Style,
    /// Menu keys and field labels.
    pub key: Style,
    /// Banner and section titles.
    pub title: Style,
}

impl Styles {
    /// The ANSI-colored sheet.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            ok: Style::new().green(),
            warn: Style::new().yellow(),
            fail: Style::new().red().bold(),
            step: Style::new().blue(),
            muted: Style::new().dimmed(),
            key: Style::new().bold(),
            title: Style::new().bold().cyan(),
        }
    }

    /// Style for a component status word: running green, stopped yellow,
    /// absent dimmed.
    #[must_use]
    pub fn for_status(&self, status: ComponentStatus) -> Style {
        match status {
            ComponentStatus::Running => self.ok,
            ComponentStatus::Present => self.warn,
            ComponentStatus::Absent => self.muted,
        }
    }
}
