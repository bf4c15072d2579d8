//! The subset of the `.npmrc` grammar understood by the config merger.
//!
//! A line is `key = value`, optionally followed by ` # comment`. The key runs
//! up to the first unescaped `=`. Full-line comments and lines that do not
//! match are dropped.

use std::sync::LazyLock;

use regex::Regex;

/// Baseline entry appended to every config file written during setup.
pub const UNSAFE_PERM: &str = "unsafe-perm = true";

#[allow(clippy::expect_used)] // literal pattern
static ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*((?:\\.|[^\\=])+?)\s*=\s*(.*?)(?:\s+#.*)?\s*$").expect("valid regex")
});

/// One `key = value` pair parsed from config text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NpmrcEntry {
    pub key: String,
    pub value: String,
}

impl NpmrcEntry {
    /// `npm config set` rejects `always-auth`, scoped or not.
    #[must_use]
    pub fn is_always_auth(&self) -> bool {
        self.key == "always-auth" || self.key.ends_with(":always-auth")
    }

    /// Render the entry as a config file line, without the newline.
    #[must_use]
    pub fn to_line(&self) -> String {
        format!("{} = {}", self.key, self.value)
    }
}

/// Parse a single line. Returns `None` for comments, blanks and anything else
/// outside the grammar.
#[must_use]
pub fn parse_line(line: &str) -> Option<NpmrcEntry> {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }
    let caps = ENTRY.captures(trimmed)?;
    Some(NpmrcEntry {
        key: caps[1].trim().to_string(),
        value: caps[2].trim().to_string(),
    })
}

/// Parse multi-line config text into entries, in input order.
#[must_use]
pub fn parse(content: &str) -> Vec<NpmrcEntry> {
    content.trim().lines().filter_map(parse_line).collect()
}
