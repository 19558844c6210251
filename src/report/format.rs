//! Human-readable rendering of a [`Report`].

use super::Report;
use crate::types::{CallSite, Diagnostic};

/// Render the report as terminal text.
pub fn render(report: &Report) -> String {
    let mut output = String::new();
    let stats = &report.stats;

    output.push_str("Ghostbusters Report\n");
    output.push_str(&format!("- Frontend calls: {}\n", stats.frontend_calls));
    output.push_str(&format!("- Backend routes: {}\n", stats.backend_routes));
    output.push_str(&format!("- Matched: {}\n", stats.matched));
    output.push_str(&format!("- Unmatched: {}\n", stats.unmatched));
    output.push_str(&format!("- Unknown: {}\n", stats.unknown));
    output.push('\n');

    if !report.unmatched.is_empty() {
        output.push_str("✗ Unmatched calls:\n");
        for call in &report.unmatched {
            format_call(&mut output, call);
        }
        output.push('\n');
    }

    if !report.unknown.is_empty() {
        output.push_str("? Unknown (dynamic/ambiguous) calls:\n");
        for call in &report.unknown {
            format_call(&mut output, call);
        }
        output.push('\n');
    }

    if !report.has_ghosts() {
        output.push_str("✓ No ghost routes found.\n");
    }

    output
}

/// Render file-level diagnostics, one per line.
pub fn render_diagnostics(diagnostics: &[Diagnostic]) -> String {
    let mut output = String::new();
    for diagnostic in diagnostics {
        output.push_str(&format!("! {}\n", diagnostic));
    }
    output
}

fn format_call(output: &mut String, call: &CallSite) {
    let path = call.path.as_deref().unwrap_or("<dynamic>");
    output.push_str(&format!(
        "- {} {}  ({}:{})\n",
        call.method,
        path,
        call.file.display(),
        call.line
    ));
}
