//! # Ghostbusters
//!
//! Static detector for "ghost routes": HTTP calls made by frontend code that
//! no backend route declares.
//!
//! Ghostbusters parses JavaScript/TypeScript with tree-sitter, collects the
//! outbound calls (`fetch`, axios-style clients) and the Express-style route
//! declarations, and matches them by method and path. It is built to run as a
//! pre-commit gate: any unmatched call fails the commit.
//!
//! ## Key Features
//!
//! - **Static**: no code is executed, no server is started
//! - **Template-aware**: `` `/users/${id}` `` resolves to `/users/*`
//! - **Parameter-aware**: `/users/:id` accepts any segment
//! - **Honest about limits**: calls with a non-literal path are reported as unknown
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ghostbusters::{scan_project, GhostConfig};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = GhostConfig::load_from_root(root).unwrap();
//! let outcome = scan_project(root, &config).unwrap();
//!
//! for ghost in &outcome.report.unmatched {
//!     println!("{} {:?}", ghost.method, ghost.path);
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod normalize;
pub mod parser;
pub mod report;
pub mod types;
pub mod walk;

// Re-exports for convenience
pub use config::GhostConfig;
pub use engine::{scan_files, scan_project, ScanOutcome};
pub use error::{GhostError, Result};
pub use matcher::{match_routes, MatchResult, MatchedPair};
pub use normalize::normalize_path;
pub use report::{Report, Stats};
pub use types::{CallSite, Diagnostic, HttpMethod, MountPoint, Route};
