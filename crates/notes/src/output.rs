//! Colored terminal output on stderr.

use console::{Term, style};

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    fn line(&self, msg: &str) {
        let _ = self.term.write_line(msg);
    }

    /// `label: value` with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: impl std::fmt::Display) {
        self.line(&format!("{} {value}", style(format!("{label}:")).dim()));
    }

    /// Green message.
    pub(crate) fn success(&self, msg: &str) {
        self.line(&style(msg).green().to_string());
    }

    /// Yellow message.
    pub(crate) fn warning(&self, msg: &str) {
        self.line(&style(msg).yellow().to_string());
    }

    /// Red message.
    pub(crate) fn error(&self, msg: &str) {
        self.line(&style(msg).red().to_string());
    }

    /// Bold cyan message.
    pub(crate) fn highlight(&self, msg: &str) {
        self.line(&style(msg).cyan().bold().to_string());
    }

    /// Horizontal rule, at most 70 columns wide.
    pub(crate) fn separator(&self) {
        let (_, cols) = self.term.size();
        self.line(&"-".repeat(usize::from(cols).min(70)));
    }
}
