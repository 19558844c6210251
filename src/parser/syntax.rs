//
//  syntax.rs
//  Ghostbusters
//
//  Typed view over the tree-sitter nodes the extractors care about.
//

use std::iter::Peekable;
use std::str::Chars;

use tree_sitter::{Node, TreeCursor};

/// One syntax node, classified into the shapes the extractors consume.
pub enum Syntax<'a> {
    Call(CallExpr<'a>),
    Member(MemberAccess<'a>),
    Identifier(&'a str),
    /// Plain quoted string, escapes decoded.
    StringLiteral(String),
    Template(TemplateLiteral),
    /// `const name = value` or `name = value`.
    Binding(Binding<'a>),
    Object(ObjectLiteral<'a>),
    /// `import name from "module"`.
    Import(DefaultImport<'a>),
    Other,
}

pub struct CallExpr<'a> {
    pub callee: Node<'a>,
    /// Positional arguments, comments excluded.
    pub args: Vec<Node<'a>>,
    pub line: usize,
}

pub struct MemberAccess<'a> {
    pub object: Node<'a>,
    pub property: &'a str,
}

/// Static text of a template literal, split at each `${...}`.
///
/// A template with `n` substitutions always has `n + 1` segments, some of
/// which may be empty.
pub struct TemplateLiteral {
    pub segments: Vec<String>,
}

impl TemplateLiteral {
    pub fn has_substitutions(&self) -> bool {
        self.segments.len() > 1
    }

    /// Join the static segments with `marker` in place of each substitution.
    pub fn join(&self, marker: &str) -> String {
        self.segments.join(marker)
    }
}

pub struct Binding<'a> {
    pub name: &'a str,
    pub value: Node<'a>,
}

pub struct ObjectLiteral<'a> {
    /// `(key, value)` pairs; quoted keys are unquoted.
    pub properties: Vec<(String, Node<'a>)>,
}

impl<'a> ObjectLiteral<'a> {
    /// First property value with the given key.
    pub fn get(&self, key: &str) -> Option<Node<'a>> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| *v)
    }
}

pub struct DefaultImport<'a> {
    pub local: &'a str,
    pub module: String,
}

/// 1-based source line of a node.
pub fn line_of(node: &Node) -> usize {
    node.start_position().row + 1
}

/// Text of a node, or "" if the range is not valid UTF-8.
pub fn node_text<'a>(node: &Node, source: &'a str) -> &'a str {
    node.utf8_text(source.as_bytes()).unwrap_or("")
}

/// Classify a node. Anything outside the consumed kinds is `Other`.
pub fn lower<'a>(node: Node<'a>, source: &'a str) -> Syntax<'a> {
    match node.kind() {
        "call_expression" => {
            let Some(callee) = node.child_by_field_name("function") else {
                return Syntax::Other;
            };
            let args = node
                .child_by_field_name("arguments")
                .filter(|a| a.kind() == "arguments")
                .map(|a| {
                    let mut cursor = a.walk();
                    let args: Vec<Node<'a>> = a
                        .named_children(&mut cursor)
                        .filter(|n| n.kind() != "comment")
                        .collect();
                    args
                })
                .unwrap_or_default();
            Syntax::Call(CallExpr {
                callee,
                args,
                line: line_of(&node),
            })
        }
        "member_expression" => {
            match (
                node.child_by_field_name("object"),
                node.child_by_field_name("property"),
            ) {
                (Some(object), Some(property)) => Syntax::Member(MemberAccess {
                    object,
                    property: node_text(&property, source),
                }),
                _ => Syntax::Other,
            }
        }
        "identifier" => Syntax::Identifier(node_text(&node, source)),
        "string" => Syntax::StringLiteral(string_value(&node, source)),
        "template_string" => Syntax::Template(template_segments(&node, source)),
        "variable_declarator" => binding(&node, source, "name", "value"),
        "assignment_expression" => binding(&node, source, "left", "right"),
        "object" => Syntax::Object(object_literal(&node, source)),
        "import_statement" => default_import(&node, source),
        _ => Syntax::Other,
    }
}

/// Like [`lower`], but first looks through parentheses and TypeScript
/// assertion wrappers (`x as T`, `x!`, `x satisfies T`).
///
/// Only for sub-expressions: the tree walk itself visits wrapped nodes too.
pub fn lower_expr<'a>(node: Node<'a>, source: &'a str) -> Syntax<'a> {
    lower(unwrap_expr(node), source)
}

fn unwrap_expr(node: Node) -> Node {
    let mut current = node;
    while matches!(
        current.kind(),
        "parenthesized_expression" | "as_expression" | "non_null_expression" | "satisfies_expression"
    ) {
        match current.named_child(0) {
            Some(inner) => current = inner,
            None => break,
        }
    }
    current
}

fn binding<'a>(node: &Node<'a>, source: &'a str, name_field: &str, value_field: &str) -> Syntax<'a> {
    match (
        node.child_by_field_name(name_field),
        node.child_by_field_name(value_field),
    ) {
        (Some(name), Some(value)) if name.kind() == "identifier" => Syntax::Binding(Binding {
            name: node_text(&name, source),
            value,
        }),
        _ => Syntax::Other,
    }
}

fn object_literal<'a>(node: &Node<'a>, source: &'a str) -> ObjectLiteral<'a> {
    let mut cursor = node.walk();
    let properties = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "pair")
        .filter_map(|pair| {
            let key = pair.child_by_field_name("key")?;
            let value = pair.child_by_field_name("value")?;
            let key = match key.kind() {
                "string" => string_value(&key, source),
                _ => node_text(&key, source).to_string(),
            };
            Some((key, value))
        })
        .collect();
    ObjectLiteral { properties }
}

fn default_import<'a>(node: &Node<'a>, source: &'a str) -> Syntax<'a> {
    let module = match node.child_by_field_name("source") {
        Some(s) if s.kind() == "string" => string_value(&s, source),
        _ => return Syntax::Other,
    };
    let mut cursor = node.walk();
    let clause = node
        .named_children(&mut cursor)
        .find(|child| child.kind() == "import_clause");
    let local = clause.and_then(|clause| {
        let mut cursor = clause.walk();
        let found = clause
            .named_children(&mut cursor)
            .find(|child| child.kind() == "identifier");
        found
    });
    match local {
        Some(local) => Syntax::Import(DefaultImport {
            local: node_text(&local, source),
            module,
        }),
        None => Syntax::Other,
    }
}

/// Value of a quoted string literal with common escapes decoded.
fn string_value(node: &Node, source: &str) -> String {
    let text = node_text(node, source);
    let inner = if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        ""
    };
    unescape(inner)
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('x') => match hex_digits(&mut chars, 2).and_then(char::from_u32) {
                Some(decoded) => out.push(decoded),
                None => out.push('x'),
            },
            Some('u') => match unicode_escape(&mut chars) {
                Some(decoded) => out.push(decoded),
                None => out.push('u'),
            },
            // Line continuation.
            Some('\r') => {
                chars.next_if_eq(&'\n');
            }
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some(other) => out.push(other),
            None => {}
        }
    }
    out
}

/// Consume exactly `len` hex digits, or nothing.
fn hex_digits(chars: &mut Peekable<Chars>, len: usize) -> Option<u32> {
    let digits: String = chars.clone().take(len).collect();
    if digits.len() != len || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(&digits, 16).ok()?;
    for _ in 0..len {
        chars.next();
    }
    Some(value)
}

/// Body of a `\u` escape: `XXXX`, `{X...}`, or a `\uD8XX\uDCXX` surrogate pair.
fn unicode_escape(chars: &mut Peekable<Chars>) -> Option<char> {
    if chars.next_if_eq(&'{').is_some() {
        if !chars.clone().any(|c| c == '}') {
            return None;
        }
        let digits: String = chars.clone().take_while(|c| *c != '}').collect();
        let value = u32::from_str_radix(&digits, 16).ok()?;
        let decoded = char::from_u32(value)?;
        for _ in 0..=digits.chars().count() {
            chars.next();
        }
        return Some(decoded);
    }

    let high = hex_digits(chars, 4)?;
    if !(0xD800..0xDC00).contains(&high) {
        return char::from_u32(high);
    }

    let mut rest = chars.clone();
    if rest.next() == Some('\\') && rest.next() == Some('u') {
        if let Some(low) = hex_digits(&mut rest, 4).filter(|low| (0xDC00..0xE000).contains(low)) {
            *chars = rest;
            return char::from_u32(0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00));
        }
    }
    Some(char::REPLACEMENT_CHARACTER)
}

/// Raw static segments of a template literal, by byte range.
fn template_segments(node: &Node, source: &str) -> TemplateLiteral {
    let mut segments = Vec::new();
    let mut start = node.start_byte() + 1;
    let end = node.end_byte().saturating_sub(1);

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "template_substitution" {
            segments.push(source.get(start..child.start_byte()).unwrap_or("").to_string());
            start = child.end_byte();
        }
    }
    segments.push(source.get(start..end).unwrap_or("").to_string());

    TemplateLiteral { segments }
}

/// Pre-order, source-order traversal of every node under `root`.
pub struct Preorder<'a> {
    cursor: TreeCursor<'a>,
    done: bool,
}

impl<'a> Preorder<'a> {
    pub fn new(root: Node<'a>) -> Self {
        Self {
            cursor: root.walk(),
            done: false,
        }
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        if self.done {
            return None;
        }
        let node = self.cursor.node();

        if !self.cursor.goto_first_child() {
            loop {
                if self.cursor.goto_next_sibling() {
                    break;
                }
                if !self.cursor.goto_parent() {
                    self.done = true;
                    break;
                }
            }
        }
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::{Parser, Tree};

    fn parse(source: &str) -> Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    fn first_of_kind<'a>(tree: &'a Tree, kind: &str) -> Node<'a> {
        Preorder::new(tree.root_node())
            .find(|n| n.kind() == kind)
            .unwrap()
    }

    #[test]
    fn test_string_literal_value() {
        let src = r#"x("/api/it\'s\n");"#;
        let tree = parse(src);
        match lower(first_of_kind(&tree, "string"), src) {
            Syntax::StringLiteral(v) => assert_eq!(v, "/api/it's\n"),
            _ => panic!("expected string literal"),
        }
    }

    fn string_literal(src: &str) -> String {
        let tree = parse(src);
        match lower(first_of_kind(&tree, "string"), src) {
            Syntax::StringLiteral(v) => v,
            _ => panic!("expected string literal"),
        }
    }

    #[test]
    fn test_string_literal_code_point_escapes() {
        assert_eq!(string_literal(r#"x("/api/\u0075sers");"#), "/api/users");
        assert_eq!(string_literal(r#"x("/api\x2Fusers");"#), "/api/users");
        assert_eq!(string_literal(r#"x("/api/\u{75}sers");"#), "/api/users");
        assert_eq!(string_literal(r#"x("/\uD83D\uDE00");"#), "/\u{1F600}");
    }

    #[test]
    fn test_string_literal_line_continuation() {
        assert_eq!(string_literal("x(\"/api/\\\nusers\");"), "/api/users");
        assert_eq!(string_literal("x('/api/\\\r\nusers');"), "/api/users");
    }

    #[test]
    fn test_template_segments() {
        let src = "x(`/api/items/${id}/detail/${a}${b}`);";
        let tree = parse(src);
        match lower(first_of_kind(&tree, "template_string"), src) {
            Syntax::Template(t) => {
                assert_eq!(t.segments, vec!["/api/items/", "/detail/", "", ""]);
                assert_eq!(t.join("*"), "/api/items/*/detail/**");
                assert!(t.has_substitutions());
            }
            _ => panic!("expected template"),
        }
    }

    #[test]
    fn test_template_without_substitution() {
        let src = "x(`/api/plain`);";
        let tree = parse(src);
        match lower(first_of_kind(&tree, "template_string"), src) {
            Syntax::Template(t) => {
                assert!(!t.has_substitutions());
                assert_eq!(t.join("*"), "/api/plain");
            }
            _ => panic!("expected template"),
        }
    }

    #[test]
    fn test_call_and_member() {
        let src = "client.delete('/a', /* note */ opts);";
        let tree = parse(src);
        let Syntax::Call(call) = lower(first_of_kind(&tree, "call_expression"), src) else {
            panic!("expected call");
        };
        assert_eq!(call.args.len(), 2);
        assert_eq!(call.line, 1);
        let Syntax::Member(member) = lower(call.callee, src) else {
            panic!("expected member");
        };
        assert_eq!(member.property, "delete");
        assert!(matches!(lower(member.object, src), Syntax::Identifier("client")));
    }

    #[test]
    fn test_object_literal_keys() {
        let src = r#"f({ method: "POST", "headers": {} });"#;
        let tree = parse(src);
        let Syntax::Object(obj) = lower(first_of_kind(&tree, "object"), src) else {
            panic!("expected object");
        };
        assert!(obj.get("method").is_some());
        assert!(obj.get("headers").is_some());
        assert!(obj.get("body").is_none());
    }

    #[test]
    fn test_default_import() {
        let src = r#"import http, { isAxiosError } from "axios";"#;
        let tree = parse(src);
        let Syntax::Import(import) = lower(first_of_kind(&tree, "import_statement"), src) else {
            panic!("expected import");
        };
        assert_eq!(import.local, "http");
        assert_eq!(import.module, "axios");
    }

    #[test]
    fn test_lower_expr_unwraps_parens() {
        let src = r#"f(("/x"));"#;
        let tree = parse(src);
        let node = first_of_kind(&tree, "parenthesized_expression");
        assert!(matches!(lower(node, src), Syntax::Other));
        assert!(matches!(lower_expr(node, src), Syntax::StringLiteral(_)));
    }

    #[test]
    fn test_preorder_is_source_order() {
        let src = "a(); b(); c();";
        let tree = parse(src);
        let callees: Vec<&str> = Preorder::new(tree.root_node())
            .filter(|n| n.kind() == "call_expression")
            .filter_map(|n| n.child_by_field_name("function"))
            .map(|n| node_text(&n, src))
            .collect();
        assert_eq!(callees, vec!["a", "b", "c"]);
    }
}
