use std::path::{Path, PathBuf};

use lintrelay_types::{
    Annotation, AnnotationLevel, CheckOutput, Conclusion, Diagnostic, LintCounts, ReportCaps,
    CHECK_NAME,
};

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// A diagnostic pointed outside the workspace root. The engine only ever
    /// lints below the root, so hitting this is a programming error upstream.
    #[error("diagnostic path '{path}' is outside the workspace root '{root}'")]
    PathOutsideWorkspace { path: String, root: PathBuf },
}

/// The translated result of a lint run: the verdict, the payload published to
/// the platform, and the full per-severity annotation lists (uncapped) that
/// feed the console report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    pub conclusion: Conclusion,
    pub output: CheckOutput,
    pub errors: Vec<Annotation>,
    pub warnings: Vec<Annotation>,
}

/// Translate diagnostics into the check-run output.
///
/// Errors map to `failure` annotations and warnings to `warning` annotations;
/// info diagnostics are dropped. The published list is errors first, then
/// warnings when `include_warnings` is set, truncated to
/// `caps.max_annotations` — a reporting cap, not a severity filter, so early
/// errors always win visibility over later warnings. The summary is computed
/// from the raw counts and is unaffected by the cap. The conclusion is
/// `failure` exactly when the error count is nonzero.
pub fn translate(
    diagnostics: &[Diagnostic],
    counts: LintCounts,
    workspace_root: &Path,
    include_warnings: bool,
    caps: &ReportCaps,
) -> Result<Translation, TranslateError> {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for diag in diagnostics {
        let Some(level) = diag.severity.annotation_level() else {
            continue;
        };
        let path = workspace_relative(&diag.path, workspace_root)?;
        let annotation = Annotation {
            path,
            start_line: diag.line,
            end_line: diag.line,
            annotation_level: level,
            message: format!("[{}] {}", diag.rule_id, diag.message),
        };
        match level {
            AnnotationLevel::Failure => errors.push(annotation),
            AnnotationLevel::Warning => warnings.push(annotation),
        }
    }

    let mut annotations: Vec<Annotation> = errors.clone();
    if include_warnings {
        annotations.extend(warnings.iter().cloned());
    }
    annotations.truncate(caps.max_annotations);

    let conclusion = if counts.errors > 0 {
        Conclusion::Failure
    } else {
        Conclusion::Success
    };

    Ok(Translation {
        conclusion,
        output: CheckOutput {
            title: CHECK_NAME.to_string(),
            summary: format!(
                "{} error(s), {} warning(s) found",
                counts.errors, counts.warnings
            ),
            annotations,
        },
        errors,
        warnings,
    })
}

/// Strip the workspace root prefix (plus one separator) from a path.
fn workspace_relative(path: &str, root: &Path) -> Result<String, TranslateError> {
    let rel = Path::new(path)
        .strip_prefix(root)
        .map_err(|_| TranslateError::PathOutsideWorkspace {
            path: path.to_string(),
            root: root.to_path_buf(),
        })?;
    Ok(rel.to_string_lossy().replace('\\', "/"))
}
