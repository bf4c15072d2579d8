//! Structural tests for layer boundaries.
//!
//! These tests scan source files so that the domain and application layers
//! keep to the imports their module docs promise.

use std::path::{Path, PathBuf};

/// Collect all `.rs` files under a directory recursively.
fn collect_rs_files(dir: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(collect_rs_files(&path));
            } else if path.extension().and_then(|e| e.to_str()) == Some("rs") {
                files.push(path);
            }
        }
    }
    files
}

/// Read a file and strip comment lines to avoid false positives.
fn read_non_comment_lines(path: &Path) -> Vec<String> {
    let Ok(content) = std::fs::read_to_string(path) else {
        return Vec::new();
    };
    content
        .lines()
        .filter(|l| {
            let trimmed = l.trim();
            !trimmed.starts_with("//") && !trimmed.starts_with("/*") && !trimmed.starts_with('*')
        })
        .map(String::from)
        .collect()
}

/// Track brace depth and return whether a line is inside a `#[cfg(test)]` block.
struct CfgTestTracker {
    in_test_block: bool,
    brace_depth: i32,
    test_block_start_depth: i32,
}

impl CfgTestTracker {
    fn new() -> Self {
        Self {
            in_test_block: false,
            brace_depth: 0,
            test_block_start_depth: 0,
        }
    }

    /// Process a line and return `true` if it's inside a `#[cfg(test)]` block.
    fn process_line(&mut self, line: &str) -> bool {
        if line.trim().contains("#[cfg(test)]") {
            self.in_test_block = true;
            self.test_block_start_depth = self.brace_depth;
        }
        for ch in line.chars() {
            match ch {
                '{' => self.brace_depth += 1,
                '}' => {
                    self.brace_depth -= 1;
                    if self.in_test_block && self.brace_depth <= self.test_block_start_depth {
                        self.in_test_block = false;
                    }
                }
                _ => {}
            }
        }
        self.in_test_block
    }
}

fn src_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

fn relative(file: &Path) -> String {
    file.strip_prefix(env!("CARGO_MANIFEST_DIR"))
        .unwrap_or(file)
        .to_string_lossy()
        .replace('\\', "/")
}

/// Report every non-test line under `layer` that mentions a forbidden path.
fn forbidden_references(layer: &str, forbidden: &[&str]) -> Vec<String> {
    let mut violations = Vec::new();
    for file in collect_rs_files(&src_dir().join(layer)) {
        let rel = relative(&file);
        let mut tracker = CfgTestTracker::new();
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            if tracker.process_line(line) {
                continue;
            }
            for needle in forbidden {
                if line.contains(needle) {
                    violations.push(format!("{rel}:{}: references `{needle}`: {line}", i + 1));
                }
            }
        }
    }
    violations
}

// ── Domain stays pure ────────────────────────────────────────────────────────

#[test]
fn domain_has_no_outer_layer_or_io_imports() {
    let violations = forbidden_references(
        "domain",
        &[
            "crate::infra",
            "crate::application",
            "crate::commands",
            "crate::output",
            "crate::app::",
            "tokio",
            "std::fs",
            "std::process",
            "std::env",
            "std::net",
        ],
    );
    assert!(
        violations.is_empty(),
        "Domain layer reaches outside itself:\n{}",
        violations.join("\n")
    );
}

#[test]
fn domain_functions_are_synchronous() {
    let violations = forbidden_references("domain", &["async fn", ".await"]);
    assert!(
        violations.is_empty(),
        "Domain layer must stay synchronous:\n{}",
        violations.join("\n")
    );
}

// ── Application goes through ports ───────────────────────────────────────────

#[test]
fn application_depends_only_on_domain() {
    let violations = forbidden_references(
        "application",
        &[
            "crate::infra",
            "crate::commands",
            "crate::output",
            "crate::app::",
            "std::fs",
            "std::env",
            "tokio::",
        ],
    );
    assert!(
        violations.is_empty(),
        "Application layer must reach the host through its ports:\n{}",
        violations.join("\n")
    );
}

#[test]
fn no_tokio_command_runner_new_outside_infra() {
    let mut violations: Vec<String> = Vec::new();

    for file in collect_rs_files(&src_dir()) {
        let rel = relative(&file);
        if rel.contains("/infra/") || rel.ends_with("/app.rs") {
            continue;
        }
        for (i, line) in read_non_comment_lines(&file).iter().enumerate() {
            if line.contains("TokioCommandRunner::new") {
                violations.push(format!(
                    "{rel}:{}: TokioCommandRunner::new outside infra/: {line}",
                    i + 1
                ));
            }
        }
    }

    assert!(
        violations.is_empty(),
        "Found TokioCommandRunner::new outside infra/ — services must take a CommandRunner:\n{}",
        violations.join("\n")
    );
}

#[test]
fn layers_are_present() {
    for layer in ["domain", "application"] {
        assert!(
            !collect_rs_files(&src_dir().join(layer)).is_empty(),
            "src/{layer} has no source files"
        );
    }
}
