//
//  helpers.rs
//  Ghostbusters
//

use tree_sitter::Node;

use crate::parser::{lower_expr, Syntax};

/// Stands in for each `${...}` of a template literal path.
pub const WILDCARD: &str = "*";

/// Resolve a path argument.
///
/// A plain string yields its value; a template literal yields its static
/// segments joined by [`WILDCARD`]. Every other shape is unresolvable.
pub fn resolve_path(arg: Node, source: &str) -> Option<String> {
    match lower_expr(arg, source) {
        Syntax::StringLiteral(value) => Some(value),
        Syntax::Template(template) => Some(template.join(WILDCARD)),
        _ => None,
    }
}

/// Name of a bare identifier expression.
pub fn identifier_name<'a>(node: Node<'a>, source: &'a str) -> Option<&'a str> {
    match lower_expr(node, source) {
        Syntax::Identifier(name) => Some(name),
        _ => None,
    }
}

/// Value of a string literal or substitution-free template.
pub fn static_string(node: Node, source: &str) -> Option<String> {
    match lower_expr(node, source) {
        Syntax::StringLiteral(value) => Some(value),
        Syntax::Template(template) if !template.has_substitutions() => {
            Some(template.join(WILDCARD))
        }
        _ => None,
    }
}
