//! Output formatting module
//!
//! Lines go to stdout, where the CI runner also picks up `::warning::` and
//! `::error::` workflow commands and turns them into annotations.

pub mod reporter;
pub mod styles;

use console::Term;
use owo_colors::OwoColorize as _;
pub use reporter::WorkflowReporter;
pub use styles::Styles;

/// Output context carrying styling and terminal state.
pub struct OutputContext {
    /// Stylesheet for colored output.
    pub styles: Styles,
    /// Whether to suppress non-error output.
    pub quiet: bool,
}

impl OutputContext {
    /// Create output context based on CLI flags and environment.
    ///
    /// Hosted runners are not TTYs but render ANSI colors, so `CI` also
    /// enables colors.
    #[must_use]
    pub fn new(no_color: bool, quiet: bool) -> Self {
        let colors_supported = Term::stdout().is_term() || std::env::var("CI").is_ok();
        let use_colors = !no_color && colors_supported && std::env::var("NO_COLOR").is_err();

        let mut styles = Styles::default();
        if use_colors {
            styles.colorize();
        }

        Self { styles, quiet }
    }

    /// Print an in-progress step prefixed with `→`. Suppressed when `quiet`.
    pub fn step(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "→".style(self.styles.step));
        }
    }

    /// Print a success message prefixed with `✓`. Suppressed when `quiet`.
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{} {msg}", "✓".style(self.styles.success));
        }
    }

    /// Emit a warning annotation. Never suppressed; annotations are not styled.
    pub fn warn(&self, msg: &str) {
        println!("::warning::{}", escape_data(msg));
    }

    /// Emit an error annotation. Never suppressed.
    pub fn error(&self, msg: &str) {
        println!("::error::{}", escape_data(msg));
    }
}

/// Escape a workflow command message so multi-line text stays one command.
#[must_use]
pub fn escape_data(msg: &str) -> String {
    msg.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
