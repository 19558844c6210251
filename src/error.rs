//
//  error.rs
//  Ghostbusters
//

use std::path::PathBuf;

/// Errors produced while enumerating, reading, or parsing source files.
///
/// None of these abort a scan: the engine turns per-file failures into
/// [`Diagnostic`](crate::types::Diagnostic)s and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum GhostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported language: {}", .0.display())]
    UnsupportedLanguage(PathBuf),

    #[error("Failed to initialize parser for {}: {1}", .0.display())]
    ParserInit(PathBuf, String),

    #[error("Parser produced no tree for {}", .0.display())]
    ParseFailed(PathBuf),

    #[error("Syntax error in {} at line {line}", .path.display())]
    Syntax { path: PathBuf, line: usize },

    #[error("Invalid config {}: {1}", .0.display())]
    Config(PathBuf, String),

    #[error("Invalid glob: {0}")]
    Glob(String),
}

pub type Result<T> = std::result::Result<T, GhostError>;
