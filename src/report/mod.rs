//! Final scan report: the matcher's partitions plus counts.

pub mod format;

use serde::Serialize;

use crate::matcher::{MatchResult, MatchedPair};
use crate::types::CallSite;

/// Summary counts for one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub frontend_calls: usize,
    pub backend_routes: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub unknown: usize,
}

/// Classified result of one run. Built once and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub matched: Vec<MatchedPair>,
    pub unmatched: Vec<CallSite>,
    pub unknown: Vec<CallSite>,
    pub stats: Stats,
}

impl Report {
    /// True when at least one call-site has no backing route.
    pub fn has_ghosts(&self) -> bool {
        !self.unmatched.is_empty()
    }
}

/// Attach counts to a match result.
pub fn assemble(result: MatchResult, call_count: usize, route_count: usize) -> Report {
    let stats = Stats {
        frontend_calls: call_count,
        backend_routes: route_count,
        matched: result.matched.len(),
        unmatched: result.unmatched.len(),
        unknown: result.unknown.len(),
    };

    Report {
        matched: result.matched,
        unmatched: result.unmatched,
        unknown: result.unknown,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::match_routes;
    use crate::types::{HttpMethod, Route};
    use std::path::PathBuf;

    fn call(method: HttpMethod, path: Option<&str>) -> CallSite {
        CallSite {
            method,
            path: path.map(str::to_string),
            file: PathBuf::from("src/client.js"),
            line: 4,
        }
    }

    #[test]
    fn test_assemble_counts() {
        let calls = vec![
            call(HttpMethod::Get, Some("/api/users")),
            call(HttpMethod::Get, Some("/api/ghost")),
            call(HttpMethod::Get, None),
        ];
        let routes = vec![Route {
            method: HttpMethod::Get,
            path: "/api/users".to_string(),
            file: PathBuf::from("server.js"),
            line: 1,
        }];
        let report = assemble(match_routes(&calls, &routes), calls.len(), routes.len());

        assert_eq!(
            report.stats,
            Stats {
                frontend_calls: 3,
                backend_routes: 1,
                matched: 1,
                unmatched: 1,
                unknown: 1,
            }
        );
        assert!(report.has_ghosts());
    }

    #[test]
    fn test_empty_report() {
        let report = assemble(MatchResult::default(), 0, 0);
        assert_eq!(report.stats, Stats::default());
        assert!(!report.has_ghosts());
    }

    #[test]
    fn test_json_shape() {
        let report = assemble(
            match_routes(&[call(HttpMethod::Unknown, None)], &[]),
            1,
            0,
        );
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["stats"]["frontendCalls"], 1);
        assert_eq!(json["stats"]["backendRoutes"], 0);
        assert_eq!(json["unknown"][0]["method"], "UNKNOWN");
        assert!(json["unknown"][0]["path"].is_null());
    }
}
