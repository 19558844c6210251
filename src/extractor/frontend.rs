//
//  frontend.rs
//  Ghostbusters
//
//  Outbound HTTP call extraction for client code (fetch + axios-style clients).
//

use std::collections::HashSet;
use std::path::Path;

use tree_sitter::Node;

use super::helpers::{identifier_name, resolve_path, static_string};
use crate::config::ClientConfig;
use crate::error::Result;
use crate::parser::syntax::CallExpr;
use crate::parser::{lower, lower_expr, parse_source, Preorder, Syntax};
use crate::types::{CallSite, HttpMethod};

/// Extract every outbound HTTP call-site from one client file.
pub fn extract_calls(path: &Path, source: &str, config: &ClientConfig) -> Result<Vec<CallSite>> {
    let tree = parse_source(path, source)?;
    let mut walk = ClientWalk::new(path, source, config);

    for node in Preorder::new(tree.root_node()) {
        walk.visit(node);
    }

    Ok(walk.calls)
}

/// Per-file walk state. The tracked client set never outlives one file.
struct ClientWalk<'c> {
    path: &'c Path,
    source: &'c str,
    config: &'c ClientConfig,
    /// Identifiers known to be HTTP client instances.
    clients: HashSet<String>,
    calls: Vec<CallSite>,
}

impl<'c> ClientWalk<'c> {
    fn new(path: &'c Path, source: &'c str, config: &'c ClientConfig) -> Self {
        Self {
            path,
            source,
            config,
            clients: config.clients.iter().cloned().collect(),
            calls: Vec::new(),
        }
    }

    fn visit(&mut self, node: Node) {
        match lower(node, self.source) {
            Syntax::Call(call) => {
                if let Some(site) = self.call_site(&call) {
                    self.calls.push(site);
                }
            }
            Syntax::Binding(binding) => {
                if self.is_factory_call(binding.value) {
                    self.clients.insert(binding.name.to_string());
                }
            }
            Syntax::Import(import) => {
                if self.config.clients.iter().any(|c| *c == import.module) {
                    self.clients.insert(import.local.to_string());
                }
            }
            Syntax::Member(_)
            | Syntax::Identifier(_)
            | Syntax::StringLiteral(_)
            | Syntax::Template(_)
            | Syntax::Object(_)
            | Syntax::Other => {}
        }
    }

    /// `<client>.create(...)` where `<client>` is already tracked.
    fn is_factory_call(&self, value: Node) -> bool {
        let Syntax::Call(call) = lower_expr(value, self.source) else {
            return false;
        };
        let Syntax::Member(member) = lower_expr(call.callee, self.source) else {
            return false;
        };
        member.property == self.config.factory
            && identifier_name(member.object, self.source)
                .is_some_and(|name| self.clients.contains(name))
    }

    fn call_site(&self, call: &CallExpr) -> Option<CallSite> {
        let method = match lower_expr(call.callee, self.source) {
            Syntax::Identifier(name) if name == self.config.fetch => {
                self.fetch_method(call.args.get(1).copied())
            }
            Syntax::Member(member) => {
                let object = identifier_name(member.object, self.source)?;
                if !self.clients.contains(object) {
                    return None;
                }
                HttpMethod::from_verb(member.property)?
            }
            _ => return None,
        };

        let path = call
            .args
            .first()
            .and_then(|arg| resolve_path(*arg, self.source));

        Some(CallSite {
            method,
            path,
            file: self.path.to_path_buf(),
            line: call.line,
        })
    }

    /// Verb of a fetch call, read from an options object literal.
    fn fetch_method(&self, options: Option<Node>) -> HttpMethod {
        let Some(options) = options else {
            return HttpMethod::Get;
        };
        let Syntax::Object(object) = lower_expr(options, self.source) else {
            return HttpMethod::Get;
        };
        object
            .get("method")
            .and_then(|value| static_string(value, self.source))
            .map(|name| HttpMethod::parse_loose(&name))
            .unwrap_or(HttpMethod::Get)
    }
}
