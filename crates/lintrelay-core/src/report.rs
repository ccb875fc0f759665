use lintrelay_types::Annotation;

use crate::translate::Translation;

/// Render the human console report: an `Errors:` section and a `Warnings:`
/// section, each listing up to `limit` findings as `path:line message`.
///
/// Best-effort debugging aid only; the check-run output is the authoritative
/// report and is built elsewhere.
pub fn render_console_report(translation: &Translation, limit: usize) -> String {
    let mut out = String::new();

    if !translation.errors.is_empty() {
        out.push_str("\nErrors:\n\n");
        push_lines(&mut out, &translation.errors, limit);
    }
    if !translation.warnings.is_empty() {
        out.push_str("\nWarnings:\n\n");
        push_lines(&mut out, &translation.warnings, limit);
    }

    out
}

fn push_lines(out: &mut String, annotations: &[Annotation], limit: usize) {
    for a in annotations.iter().take(limit) {
        out.push_str(&format!("{}:{} {}\n", a.path, a.start_line, a.message));
    }
    if annotations.len() > limit {
        out.push_str(&format!("... and {} more\n", annotations.len() - limit));
    }
}
