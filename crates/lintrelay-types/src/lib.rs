//! Data types shared across the lintrelay workspace.
//!
//! This crate is intentionally "dumb": pure DTOs with serde, plus the frozen
//! vocabulary the rest of the workspace agrees on. No I/O happens here.

use serde::{Deserialize, Serialize};

// ── Frozen Vocabulary ──────────────────────────────────────────
/// Display name of the check run as it appears in the platform UI.
pub const CHECK_NAME: &str = "lintrelay check";

/// Annotations published per check run. The platform UI shows at most a
/// handful anyway; everything past this cap only inflates the payload.
pub const DEFAULT_MAX_ANNOTATIONS: usize = 20;

/// Findings echoed to the console per severity group.
pub const DEFAULT_CONSOLE_LIMIT: usize = 50;

/// Extensions considered when no filter is configured.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".js", ".jsx", ".tsx"];

/// Ignore file consulted during file discovery when none is configured.
pub const DEFAULT_IGNORE_FILE: &str = ".gitignore";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    /// The annotation level published for this severity, if any.
    ///
    /// Info diagnostics are never annotated; only warnings and errors make it
    /// into a check-run output.
    pub fn annotation_level(self) -> Option<AnnotationLevel> {
        match self {
            Severity::Info => None,
            Severity::Warning => Some(AnnotationLevel::Warning),
            Severity::Error => Some(AnnotationLevel::Failure),
        }
    }
}

/// One finding produced by the lint engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path as discovered by the engine, relative to the lint root.
    pub path: String,
    /// 1-based line number.
    pub line: u32,
    pub severity: Severity,
    pub rule_id: String,
    pub message: String,
}

/// Severity label vocabulary of the remote annotation API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationLevel {
    Warning,
    Failure,
}

impl AnnotationLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            AnnotationLevel::Warning => "warning",
            AnnotationLevel::Failure => "failure",
        }
    }
}

/// One inline annotation, shaped exactly like the remote API expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Workspace-relative path with forward slashes.
    pub path: String,
    pub start_line: u32,
    pub end_line: u32,
    pub annotation_level: AnnotationLevel,
    /// `[rule_id]` followed by the diagnostic message.
    pub message: String,
}

/// Terminal verdict of a check run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conclusion {
    Success,
    Failure,
}

impl Conclusion {
    pub fn as_str(self) -> &'static str {
        match self {
            Conclusion::Success => "success",
            Conclusion::Failure => "failure",
        }
    }
}

/// The report attached to a completed check run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutput {
    pub title: String,
    pub summary: String,
    pub annotations: Vec<Annotation>,
}

/// Aggregate severity counts over a whole lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LintCounts {
    pub infos: u32,
    pub warnings: u32,
    pub errors: u32,
}

/// Reporting caps, kept as named configuration rather than inline literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportCaps {
    /// Maximum annotations published with the check-run output.
    pub max_annotations: usize,
    /// Maximum findings echoed to the console per severity group.
    pub console_limit: usize,
}

impl Default for ReportCaps {
    fn default() -> Self {
        Self {
            max_annotations: DEFAULT_MAX_ANNOTATIONS,
            console_limit: DEFAULT_CONSOLE_LIMIT,
        }
    }
}

/// The on-disk rule configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub rule: Vec<RuleConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleConfig {
    pub id: String,
    pub severity: Severity,
    pub message: String,

    /// One or more regex patterns; a line matching any of them violates the rule.
    pub patterns: Vec<String>,

    /// Include path globs. Empty means "all".
    #[serde(default)]
    pub paths: Vec<String>,

    /// Exclude path globs.
    #[serde(default)]
    pub exclude_paths: Vec<String>,
}

impl ConfigFile {
    /// The built-in ruleset used when no configuration file is present.
    pub fn built_in() -> Self {
        Self {
            rule: vec![
                RuleConfig {
                    id: "js.no_console".to_string(),
                    severity: Severity::Warning,
                    message: "Remove console.log before merging.".to_string(),
                    patterns: vec![r"\bconsole\.(log|debug|info)\s*\(".to_string()],
                    paths: vec![],
                    exclude_paths: vec![
                        "**/*.test.*".to_string(),
                        "**/*.spec.*".to_string(),
                    ],
                },
                RuleConfig {
                    id: "js.no_debugger".to_string(),
                    severity: Severity::Error,
                    message: "Remove debugger statements before merging.".to_string(),
                    patterns: vec![r"\bdebugger\b".to_string()],
                    paths: vec![],
                    exclude_paths: vec![],
                },
                RuleConfig {
                    id: "js.no_eval".to_string(),
                    severity: Severity::Error,
                    message: "Avoid eval() - potential code injection risk.".to_string(),
                    patterns: vec![r"\beval\s*\(".to_string()],
                    paths: vec![],
                    exclude_paths: vec!["**/*.test.*".to_string()],
                },
                RuleConfig {
                    id: "js.no_only_tests".to_string(),
                    severity: Severity::Error,
                    message: "Remove focused tests (.only) before merging.".to_string(),
                    patterns: vec![r"\b(describe|it|test)\.only\s*\(".to_string()],
                    paths: vec!["**/*.test.*".to_string(), "**/*.spec.*".to_string()],
                    exclude_paths: vec![],
                },
                RuleConfig {
                    id: "style.no_todo".to_string(),
                    severity: Severity::Warning,
                    message: "Resolve TODO/FIXME comments before merging.".to_string(),
                    patterns: vec![r"\bTODO\b".to_string(), r"\bFIXME\b".to_string()],
                    paths: vec![],
                    exclude_paths: vec![],
                },
                RuleConfig {
                    id: "style.no_merge_markers".to_string(),
                    severity: Severity::Error,
                    message: "Unresolved merge conflict marker.".to_string(),
                    patterns: vec![r"^(<{7}|={7}|>{7})( |$)".to_string()],
                    paths: vec![],
                    exclude_paths: vec![],
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_and_level_as_str() {
        assert_eq!(Severity::Info.as_str(), "info");
        assert_eq!(Severity::Warning.as_str(), "warning");
        assert_eq!(Severity::Error.as_str(), "error");

        assert_eq!(AnnotationLevel::Warning.as_str(), "warning");
        assert_eq!(AnnotationLevel::Failure.as_str(), "failure");

        assert_eq!(Conclusion::Success.as_str(), "success");
        assert_eq!(Conclusion::Failure.as_str(), "failure");
    }

    #[test]
    fn severity_maps_to_annotation_level() {
        assert_eq!(Severity::Info.annotation_level(), None);
        assert_eq!(
            Severity::Warning.annotation_level(),
            Some(AnnotationLevel::Warning)
        );
        assert_eq!(
            Severity::Error.annotation_level(),
            Some(AnnotationLevel::Failure)
        );
    }

    #[test]
    fn annotation_serializes_to_wire_shape() {
        let a = Annotation {
            path: "src/app.js".to_string(),
            start_line: 12,
            end_line: 12,
            annotation_level: AnnotationLevel::Failure,
            message: "[js.no_debugger] Remove debugger statements before merging.".to_string(),
        };

        let value = serde_json::to_value(&a).expect("serialize annotation");
        assert_eq!(value["path"], "src/app.js");
        assert_eq!(value["start_line"], 12);
        assert_eq!(value["end_line"], 12);
        assert_eq!(value["annotation_level"], "failure");
        assert!(value["message"]
            .as_str()
            .expect("message string")
            .starts_with("[js.no_debugger]"));
    }

    #[test]
    fn conclusion_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Conclusion::Success).expect("serialize"),
            serde_json::json!("success")
        );
        assert_eq!(
            serde_json::to_value(Conclusion::Failure).expect("serialize"),
            serde_json::json!("failure")
        );
    }

    #[test]
    fn report_caps_defaults() {
        let caps = ReportCaps::default();
        assert_eq!(caps.max_annotations, DEFAULT_MAX_ANNOTATIONS);
        assert_eq!(caps.console_limit, DEFAULT_CONSOLE_LIMIT);
    }

    #[test]
    fn built_in_rules_have_unique_ids_and_patterns() {
        let cfg = ConfigFile::built_in();
        assert!(!cfg.rule.is_empty());

        let ids: std::collections::HashSet<&str> =
            cfg.rule.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), cfg.rule.len(), "rule IDs should be unique");

        for rule in &cfg.rule {
            assert!(!rule.patterns.is_empty(), "rule '{}' has no patterns", rule.id);
        }
    }

    #[test]
    fn config_file_parses_from_toml() {
        let text = r#"
[[rule]]
id = "custom.no_foo"
severity = "error"
message = "No foo."
patterns = ["\\bfoo\\b"]
paths = ["**/*.js"]
"#;
        let cfg: ConfigFile = toml::from_str(text).expect("parse config");
        assert_eq!(cfg.rule.len(), 1);
        assert_eq!(cfg.rule[0].id, "custom.no_foo");
        assert_eq!(cfg.rule[0].severity, Severity::Error);
        assert!(cfg.rule[0].exclude_paths.is_empty());
    }
}
