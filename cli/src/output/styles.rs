//! Stylesheet for terminal output.
//!
//! Every field starts as the plain `Style::new()`; `colorize` fills them in
//! only when the terminal and flags allow color.

use owo_colors::Style;

#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    /// Keys in key/value listings.
    pub dim: Style,
    pub header: Style,
    /// Arrow in front of pipeline steps.
    pub step: Style,
    /// Bootstrap version numbers.
    pub version: Style,
}

impl Styles {
    pub fn colorize(&mut self) {
        *self = Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red(),
            dim: Style::new().dimmed(),
            header: Style::new().bold().cyan(),
            step: Style::new().cyan(),
            version: Style::new().bold().magenta(),
        };
    }
}
