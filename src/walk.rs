//
//  walk.rs
//  Ghostbusters
//

use ignore::overrides::{Override, OverrideBuilder};
use ignore::WalkBuilder;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{GhostError, Result};
use crate::parser::SupportedLanguage;

/// Per-project ignore file, same syntax as .gitignore.
pub const IGNORE_FILE: &str = ".ghostbustersignore";

/// Directories that are never scanned, even without a .gitignore.
const BUILTIN_IGNORE: &[&str] = &[
    "node_modules",
    "bower_components",
    "vendor",
    "dist",
    "build",
    ".git",
    ".svn",
    ".hg",
    ".next",
    ".nuxt",
    ".output",
    ".turbo",
    ".cache",
    ".vercel",
    "coverage",
    "target",
];

/// Check if a directory or file name is on the built-in ignore list.
fn is_builtin_ignored(name: &OsStr) -> bool {
    name.to_str()
        .is_some_and(|name| BUILTIN_IGNORE.contains(&name))
}

/// Compile gitignore-style globs rooted at `root`.
fn build_overrides(root: &Path, globs: impl IntoIterator<Item = String>) -> Result<Override> {
    let mut builder = OverrideBuilder::new(root);
    for glob in globs {
        builder
            .add(&glob)
            .map_err(|e| GhostError::Glob(format!("{glob}: {e}")))?;
    }
    builder.build().map_err(|e| GhostError::Glob(e.to_string()))
}

/// Enumerate the JS/TS files under `root` that match any `include` glob and
/// no `exclude` glob. Globs are relative to `root`.
///
/// Respects .gitignore and `.ghostbustersignore`, skips hidden files, and
/// returns paths in a stable, name-sorted order.
pub fn collect_files(root: &Path, include: &[String], exclude: &[String]) -> Result<Vec<PathBuf>> {
    if include.is_empty() {
        return Ok(Vec::new());
    }

    let include = build_overrides(root, include.iter().cloned())?;
    let exclude = build_overrides(root, exclude.iter().map(|glob| format!("!{glob}")))?;

    let files = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .add_custom_ignore_filename(IGNORE_FILE)
        .overrides(exclude)
        .sort_by_file_name(|a, b| a.cmp(b))
        .filter_entry(|entry| entry.depth() == 0 || !is_builtin_ignored(entry.file_name()))
        .build()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
        .filter(|entry| SupportedLanguage::from_path(entry.path()).is_some())
        .filter(|entry| include.matched(entry.path(), false).is_whitelist())
        .map(|entry| entry.into_path())
        .collect();

    Ok(files)
}
