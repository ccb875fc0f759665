use std::path::Path;

use tracing::debug;

use lintrelay_types::{Diagnostic, LintCounts, Severity};

use crate::rules::CompiledRule;
use crate::EngineError;

/// The complete result of one lint run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintReport {
    pub diagnostics: Vec<Diagnostic>,
    pub counts: LintCounts,
    pub files_scanned: u32,
}

/// Evaluate every applicable rule against every line of the given files.
///
/// `files` are root-relative; rule globs match against the relative path while
/// emitted diagnostics carry the absolute path (the translator strips the
/// workspace prefix later). Line numbers are 1-based. Each rule reports at
/// most once per line, on its first matching pattern.
pub fn evaluate_files(
    root: &Path,
    files: &[std::path::PathBuf],
    rules: &[CompiledRule],
) -> Result<LintReport, EngineError> {
    let mut diagnostics = Vec::new();
    let mut counts = LintCounts::default();
    let mut files_scanned: u32 = 0;

    for rel in files {
        let applicable: Vec<&CompiledRule> =
            rules.iter().filter(|r| r.applies_to(rel)).collect();
        if applicable.is_empty() {
            continue;
        }

        let abs = root.join(rel);
        let text = match std::fs::read_to_string(&abs) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                debug!("skipping non-UTF-8 file {}", abs.display());
                continue;
            }
            Err(e) => {
                return Err(EngineError::Io {
                    path: abs,
                    source: e,
                })
            }
        };
        files_scanned = files_scanned.saturating_add(1);

        let abs_str = abs.to_string_lossy().replace('\\', "/");
        for (idx, line) in text.lines().enumerate() {
            for rule in &applicable {
                if rule.patterns.iter().any(|p| p.is_match(line)) {
                    bump_counts(&mut counts, rule.severity);
                    diagnostics.push(Diagnostic {
                        path: abs_str.clone(),
                        line: (idx + 1) as u32,
                        severity: rule.severity,
                        rule_id: rule.id.clone(),
                        message: rule.message.clone(),
                    });
                }
            }
        }
    }

    Ok(LintReport {
        diagnostics,
        counts,
        files_scanned,
    })
}

fn bump_counts(counts: &mut LintCounts, severity: Severity) {
    match severity {
        Severity::Info => counts.infos = counts.infos.saturating_add(1),
        Severity::Warning => counts.warnings = counts.warnings.saturating_add(1),
        Severity::Error => counts.errors = counts.errors.saturating_add(1),
    }
}
