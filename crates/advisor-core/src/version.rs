//! Version stamp resolution.
//!
//! Precedence: a `VERSION` file in the given directory (trimmed), then the
//! latest git log line, then the crate version baked in at build time. Every
//! fallback is silent; the page always gets something to show.

use std::path::Path;
use std::process::Command;

const DEFAULT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn resolve(dir: &Path) -> String {
    if let Ok(contents) = std::fs::read_to_string(dir.join("VERSION")) {
        let trimmed = contents.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    if let Some(line) = git_log_line(dir) {
        return line;
    }

    DEFAULT_VERSION.to_string()
}

fn git_log_line(dir: &Path) -> Option<String> {
    let output = Command::new("git")
        .args(["log", "-1", "--pretty=format:%h %s"])
        .current_dir(dir)
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let line = String::from_utf8(output.stdout).ok()?;
    let line = line.trim();
    if line.is_empty() {
        None
    } else {
        Some(line.to_string())
    }
}
