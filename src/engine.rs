//
//  engine.rs
//  Ghostbusters
//
//  Enumerate -> extract (parallel, per file) -> aggregate -> match -> assemble.
//

use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::GhostConfig;
use crate::error::Result;
use crate::extractor::{extract_calls, extract_routes, BackendExtraction};
use crate::matcher::match_routes;
use crate::report::{assemble, Report};
use crate::types::{CallSite, Diagnostic, MountPoint, Route};
use crate::walk::collect_files;

/// Everything one scan produces.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanOutcome {
    pub report: Report,
    /// Sub-router registrations, reported for visibility only.
    pub mounts: Vec<MountPoint>,
    /// Files that could not be read or parsed.
    pub diagnostics: Vec<Diagnostic>,
}

/// Enumerate both file groups under `root` and scan them.
pub fn scan_project(root: &Path, config: &GhostConfig) -> Result<ScanOutcome> {
    let frontend = collect_files(root, &config.scan.frontend, &config.scan.ignore)?;
    let backend = collect_files(root, &config.scan.backend, &config.scan.ignore)?;

    info!(
        root = %root.display(),
        frontend_files = frontend.len(),
        backend_files = backend.len(),
        "Enumerated files"
    );

    Ok(scan_files(&frontend, &backend, config))
}

/// Scan explicit file lists. A file that fails to read or parse contributes
/// nothing and becomes a diagnostic.
pub fn scan_files(frontend: &[PathBuf], backend: &[PathBuf], config: &GhostConfig) -> ScanOutcome {
    let client_results: Vec<Result<Vec<CallSite>>> = frontend
        .par_iter()
        .map(|path| -> Result<Vec<CallSite>> {
            let source = std::fs::read_to_string(path)?;
            extract_calls(path, &source, &config.client)
        })
        .collect();

    let server_results: Vec<Result<BackendExtraction>> = backend
        .par_iter()
        .map(|path| -> Result<BackendExtraction> {
            let source = std::fs::read_to_string(path)?;
            extract_routes(path, &source, &config.server)
        })
        .collect();

    let mut calls: Vec<CallSite> = Vec::new();
    let mut routes: Vec<Route> = Vec::new();
    let mut mounts: Vec<MountPoint> = Vec::new();
    let mut diagnostics: Vec<Diagnostic> = Vec::new();

    for (path, result) in frontend.iter().zip(client_results) {
        match result {
            Ok(found) => {
                debug!(file = %path.display(), calls = found.len(), "Extracted calls");
                calls.extend(found);
            }
            Err(e) => diagnostics.push(diagnostic(path, e.to_string())),
        }
    }

    for (path, result) in backend.iter().zip(server_results) {
        match result {
            Ok(found) => {
                debug!(
                    file = %path.display(),
                    routes = found.routes.len(),
                    mounts = found.mounts.len(),
                    "Extracted routes"
                );
                routes.extend(found.routes);
                mounts.extend(found.mounts);
            }
            Err(e) => diagnostics.push(diagnostic(path, e.to_string())),
        }
    }

    let result = match_routes(&calls, &routes);
    let report = assemble(result, calls.len(), routes.len());

    info!(
        calls = report.stats.frontend_calls,
        routes = report.stats.backend_routes,
        matched = report.stats.matched,
        unmatched = report.stats.unmatched,
        unknown = report.stats.unknown,
        "Scan complete"
    );

    ScanOutcome {
        report,
        mounts,
        diagnostics,
    }
}

fn diagnostic(path: &Path, message: String) -> Diagnostic {
    warn!(file = %path.display(), "{}", message);
    Diagnostic {
        file: path.to_path_buf(),
        message,
    }
}
