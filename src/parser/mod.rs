//
//  mod.rs
//  Ghostbusters
//

pub mod language;
pub mod syntax;

pub use language::SupportedLanguage;
pub use syntax::{lower, lower_expr, Preorder, Syntax};

use std::path::Path;

use tree_sitter::{Parser, Tree};

use crate::error::{GhostError, Result};

/// Parse a JS/TS source file into a tree-sitter tree.
///
/// tree-sitter recovers from syntax errors, but a file with any error node is
/// rejected here so that a broken file contributes nothing instead of a
/// partial, misleading set of calls or routes. A `.js` file that only fails
/// because of type annotations is re-parsed with the TSX grammar.
pub fn parse_source(path: &Path, source: &str) -> Result<Tree> {
    let lang = SupportedLanguage::from_path(path)
        .ok_or_else(|| GhostError::UnsupportedLanguage(path.to_path_buf()))?;

    let tree = parse_with(path, source, lang)?;
    if !tree.root_node().has_error() {
        return Ok(tree);
    }

    if lang == SupportedLanguage::JavaScript {
        let annotated = parse_with(path, source, SupportedLanguage::Tsx)?;
        if !annotated.root_node().has_error() {
            return Ok(annotated);
        }
    }

    Err(GhostError::Syntax {
        path: path.to_path_buf(),
        line: first_error_line(&tree),
    })
}

fn parse_with(path: &Path, source: &str, lang: SupportedLanguage) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&lang.tree_sitter_language())
        .map_err(|e| GhostError::ParserInit(path.to_path_buf(), e.to_string()))?;

    parser
        .parse(source, None)
        .ok_or_else(|| GhostError::ParseFailed(path.to_path_buf()))
}

fn first_error_line(tree: &Tree) -> usize {
    Preorder::new(tree.root_node())
        .find(|n| n.is_error() || n.is_missing())
        .map(|n| syntax::line_of(&n))
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_valid_sources() {
        let js = "const r = await fetch('/api/users');";
        assert!(parse_source(&PathBuf::from("a.js"), js).is_ok());

        let ts = "const r: Response = await fetch<User>('/api/users' as string);";
        assert!(parse_source(&PathBuf::from("a.ts"), ts).is_ok());

        let tsx = "export const A = () => <div onClick={() => fetch('/x')}>hi</div>;";
        assert!(parse_source(&PathBuf::from("a.tsx"), tsx).is_ok());
    }

    #[test]
    fn test_parse_syntax_error() {
        let src = "const a = 1;\nfunction (\n";
        match parse_source(&PathBuf::from("broken.js"), src) {
            Err(GhostError::Syntax { line, .. }) => assert!(line >= 1),
            Err(e) => panic!("expected syntax error, got {e}"),
            Ok(_) => panic!("expected syntax error"),
        }
    }

    #[test]
    fn test_annotated_javascript_falls_back_to_tsx() {
        let src = "function f(a: string) { return fetch('/a'); }\nconst el = <div>{f('x')}</div>;\n";
        assert!(parse_source(&PathBuf::from("a.js"), src).is_ok());

        let broken = "function f(a: string) {\n";
        match parse_source(&PathBuf::from("a.js"), broken) {
            Err(GhostError::Syntax { .. }) => {}
            Err(e) => panic!("expected syntax error, got {e}"),
            Ok(_) => panic!("expected syntax error"),
        }
    }

    #[test]
    fn test_unsupported_language() {
        let err = parse_source(&PathBuf::from("main.py"), "print('x')").err().unwrap();
        assert!(matches!(err, GhostError::UnsupportedLanguage(_)));
    }
}
