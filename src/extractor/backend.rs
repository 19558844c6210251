//
//  backend.rs
//  Ghostbusters
//
//  Route declaration extraction for Express-style server code.
//

use std::path::Path;

use super::helpers::{identifier_name, resolve_path, WILDCARD};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::parser::syntax::CallExpr;
use crate::parser::{lower, lower_expr, parse_source, Preorder, Syntax};
use crate::types::{HttpMethod, MountPoint, Route};

/// Routes and mount points declared in one server file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendExtraction {
    pub routes: Vec<Route>,
    pub mounts: Vec<MountPoint>,
}

/// Extract route declarations (`app.get("/x", ...)`) and mount points
/// (`app.use("/api", router)`) from one server file.
pub fn extract_routes(path: &Path, source: &str, config: &ServerConfig) -> Result<BackendExtraction> {
    let tree = parse_source(path, source)?;
    let mut out = BackendExtraction::default();

    for node in Preorder::new(tree.root_node()) {
        let Syntax::Call(call) = lower(node, source) else {
            continue;
        };
        let Syntax::Member(member) = lower_expr(call.callee, source) else {
            continue;
        };

        if let Some(method) = HttpMethod::from_verb(member.property) {
            if let Some(route) = declared_route(path, source, &call, method) {
                out.routes.push(route);
            }
        } else if member.property == config.mount {
            if let Some(mount) = mount_point(path, source, &call) {
                out.mounts.push(mount);
            }
        }
    }

    Ok(out)
}

fn declared_route(path: &Path, source: &str, call: &CallExpr, method: HttpMethod) -> Option<Route> {
    let route_path = resolve_path(*call.args.first()?, source)?;

    // `.get(key)` on a Map or cache is not a route.
    if route_path.is_empty() || !(route_path.starts_with('/') || route_path == WILDCARD) {
        return None;
    }

    Some(Route {
        method,
        path: route_path,
        file: path.to_path_buf(),
        line: call.line,
    })
}

fn mount_point(path: &Path, source: &str, call: &CallExpr) -> Option<MountPoint> {
    let [prefix, target, ..] = call.args.as_slice() else {
        return None;
    };
    let Syntax::StringLiteral(prefix) = lower_expr(*prefix, source) else {
        return None;
    };
    let target = identifier_name(*target, source)?;

    Some(MountPoint {
        path: prefix,
        target: target.to_string(),
        file: path.to_path_buf(),
        line: call.line,
    })
}
