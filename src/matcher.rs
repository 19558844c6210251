//
//  matcher.rs
//  Ghostbusters
//

use serde::Serialize;

use crate::normalize::segments;
use crate::types::{CallSite, HttpMethod, Route};

/// A call-site paired with the route it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedPair {
    pub call: CallSite,
    pub route: Route,
}

/// Disjoint partition of the call-site set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchResult {
    pub matched: Vec<MatchedPair>,
    /// No route satisfies both method and path: ghost routes.
    pub unmatched: Vec<CallSite>,
    /// Dynamic call-sites, never compared.
    pub unknown: Vec<CallSite>,
}

/// Classify every call-site against the declared routes.
///
/// The first route (in declaration order) that matches both method and path
/// wins. Call order is preserved inside each bucket.
pub fn match_routes(calls: &[CallSite], routes: &[Route]) -> MatchResult {
    let mut result = MatchResult::default();

    for call in calls {
        let Some(call_path) = call.path.as_deref() else {
            result.unknown.push(call.clone());
            continue;
        };

        let found = routes
            .iter()
            .find(|r| method_matches(call.method, r.method) && path_matches(call_path, &r.path));

        match found {
            Some(route) => result.matched.push(MatchedPair {
                call: call.clone(),
                route: route.clone(),
            }),
            None => result.unmatched.push(call.clone()),
        }
    }

    result
}

/// `UNKNOWN` on the call side matches any declared verb.
fn method_matches(call: HttpMethod, route: HttpMethod) -> bool {
    call == HttpMethod::Unknown || call == route
}

/// Segment-wise comparison after normalization. A route segment starting with
/// `:` matches any call segment; everything else, including the template
/// wildcard, must be identical.
fn path_matches(call_path: &str, route_path: &str) -> bool {
    let call = segments(call_path);
    let route = segments(route_path);

    call.len() == route.len()
        && call
            .iter()
            .zip(&route)
            .all(|(c, r)| r.starts_with(':') || c == r)
}
