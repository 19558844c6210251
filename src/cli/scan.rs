//! Scan command: run the pipeline, print the report, pick the exit code.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::GhostConfig;
use crate::engine::{scan_project, ScanOutcome};
use crate::report::format::{render, render_diagnostics};

/// Output and gating switches for one scan.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScanOptions {
    pub json: bool,
    pub silent: bool,
    pub strict: bool,
}

/// Scan `root` and print the result. Returns 1 when the commit should be
/// blocked, 0 otherwise.
pub fn scan(root: &Path, config: &GhostConfig, options: ScanOptions) -> Result<i32> {
    let outcome = scan_project(root, config)
        .with_context(|| format!("Failed to scan {}", root.display()))?;

    if !options.silent {
        if options.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            print!("{}", render(&outcome.report));
            if !outcome.diagnostics.is_empty() {
                eprint!("{}", render_diagnostics(&outcome.diagnostics));
            }
        }
    }

    Ok(exit_code(&outcome, options.strict))
}

fn exit_code(outcome: &ScanOutcome, strict: bool) -> i32 {
    if outcome.report.has_ghosts() || (strict && !outcome.diagnostics.is_empty()) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CallSite, Diagnostic, HttpMethod};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn with_diagnostic() -> ScanOutcome {
        ScanOutcome {
            diagnostics: vec![Diagnostic {
                file: PathBuf::from("bad.js"),
                message: "Syntax error in bad.js at line 1".to_string(),
            }],
            ..ScanOutcome::default()
        }
    }

    #[test]
    fn test_exit_code() {
        assert_eq!(exit_code(&ScanOutcome::default(), true), 0);

        let mut ghost = ScanOutcome::default();
        ghost.report.unmatched.push(CallSite {
            method: HttpMethod::Get,
            path: Some("/ghost".to_string()),
            file: PathBuf::from("a.js"),
            line: 1,
        });
        assert_eq!(exit_code(&ghost, false), 1);

        assert_eq!(exit_code(&with_diagnostic(), false), 0);
        assert_eq!(exit_code(&with_diagnostic(), true), 1);
    }

    #[test]
    fn test_scan_blocks_on_ghost() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/app.js"), "fetch('/api/nowhere');\n").unwrap();

        let options = ScanOptions {
            silent: true,
            ..ScanOptions::default()
        };
        let code = scan(dir.path(), &GhostConfig::default(), options).unwrap();
        assert_eq!(code, 1);
    }
}
