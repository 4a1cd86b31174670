//! Architectural Enforcement Integration Tests
//!
//! Source-scanning tests that keep the workspace honest:
//! - The widget core never sleeps, spawns, or reads the wall clock for
//!   timing; every delay goes through its timer queue
//! - The terminal surface only sleeps to limit its frame rate
//!
//! This library holds the shared scanning helpers; the checks live in
//! `tests/`.

use std::fs;
use std::path::{Path, PathBuf};

/// Workspace root, two levels above this crate
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// A line of source that matched a rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: PathBuf,
    pub line: usize,
    pub text: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{} - {}", self.path.display(), self.line, self.text)
    }
}

/// Every `.rs` file under `dir` (relative to the workspace root) with its lines
pub fn rust_sources(dir: &str) -> Vec<(PathBuf, Vec<String>)> {
    let path = workspace_root().join(dir);
    if !path.exists() {
        return Vec::new();
    }

    walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().and_then(|s| s.to_str()) == Some("rs"))
        .filter_map(|e| {
            let content = fs::read_to_string(e.path()).ok()?;
            let lines = content.lines().map(str::to_string).collect();
            Some((e.path().to_path_buf(), lines))
        })
        .collect()
}

/// The code part of a line, with any `//` comment stripped
pub fn code_part(line: &str) -> &str {
    line.split("//").next().unwrap_or(line)
}

/// Index of the line that opens the `#[cfg(test)]` module, if any.
///
/// Unit tests sit at the bottom of each file, so everything from here down
/// is test code.
pub fn test_module_start(lines: &[String]) -> Option<usize> {
    lines.iter().position(|l| l.trim() == "#[cfg(test)]")
}

/// Lines in production code (above the test module) containing any pattern
pub fn find_in_production(dir: &str, patterns: &[&str]) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (path, lines) in rust_sources(dir) {
        let end = test_module_start(&lines).unwrap_or(lines.len());
        for (idx, line) in lines[..end].iter().enumerate() {
            let code = code_part(line);
            if patterns.iter().any(|p| code.contains(p)) {
                violations.push(Violation {
                    path: path.clone(),
                    line: idx + 1,
                    text: line.trim().to_string(),
                });
            }
        }
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_part_strips_comments() {
        assert_eq!(code_part("let x = 1; // sleep(1)"), "let x = 1; ");
        assert_eq!(code_part("// thread::sleep("), "");
    }

    #[test]
    fn test_test_module_start() {
        let lines: Vec<String> = ["fn a() {}", "", "#[cfg(test)]", "mod tests {}"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(test_module_start(&lines), Some(2));
    }

    #[test]
    fn test_workspace_root_has_members() {
        assert!(workspace_root().join("tutor/core/src").exists());
        assert!(workspace_root().join("tui/src").exists());
    }
}
