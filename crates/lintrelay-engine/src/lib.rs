//! Lint engine: rule compilation, file discovery and line evaluation.
//!
//! The engine owns everything between "here is a checked-out tree" and "here
//! is the complete list of diagnostics with severity counts". It knows nothing
//! about check runs or annotations; translating its output for the hosting
//! platform happens one layer up.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use lintrelay_types::{ConfigFile, DEFAULT_EXTENSIONS, DEFAULT_IGNORE_FILE};

mod evaluate;
mod rules;
mod walk;

pub use evaluate::{evaluate_files, LintReport};
pub use rules::{compile_rules, CompiledRule, RuleCompileError};
pub use walk::{discover_files, IgnoreSet};

/// Name of the optional rule configuration file at the lint root.
pub const CONFIG_FILE_NAME: &str = "lintrelay.toml";

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk '{path}': {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("invalid rule configuration '{path}': {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("ignore file '{path}' has invalid pattern '{pattern}': {source}")]
    IgnorePattern {
        path: PathBuf,
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error(transparent)]
    Rule(#[from] RuleCompileError),
}

/// Inputs of one lint run, resolved by the caller.
#[derive(Debug, Clone)]
pub struct LintOptions {
    /// Files or directories to lint, relative to the root.
    pub files: Vec<String>,
    /// Filename suffixes to consider, e.g. `.js`.
    pub extensions: Vec<String>,
    /// Ignore file consulted during discovery, relative to the root.
    pub ignore_file: String,
    /// Explicit rule configuration path; `None` falls back to
    /// `lintrelay.toml` at the root, then to the built-in ruleset.
    pub config_path: Option<PathBuf>,
}

impl Default for LintOptions {
    fn default() -> Self {
        Self {
            files: vec![".".to_string()],
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            config_path: None,
        }
    }
}

/// Run the full lint pipeline over `root`.
pub fn run_lint(root: &Path, options: &LintOptions) -> Result<LintReport, EngineError> {
    let config = load_config(root, options.config_path.as_deref())?;
    let rules = compile_rules(&config.rule)?;

    let ignore = IgnoreSet::load(&root.join(&options.ignore_file))?;
    let files = discover_files(root, &options.files, &options.extensions, &ignore)?;
    debug!("discovered {} candidate file(s)", files.len());

    let report = evaluate_files(root, &files, &rules)?;
    info!(
        files = report.files_scanned,
        errors = report.counts.errors,
        warnings = report.counts.warnings,
        "lint run finished"
    );
    Ok(report)
}

/// Load the rule configuration: explicit path, then `lintrelay.toml` at the
/// root if present, then the built-in ruleset.
fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ConfigFile, EngineError> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = root.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                debug!("no {CONFIG_FILE_NAME} found; using built-in rules");
                return Ok(ConfigFile::built_in());
            }
            candidate
        }
    };

    let text = std::fs::read_to_string(&path).map_err(|e| EngineError::Io {
        path: path.clone(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| EngineError::Config {
        path,
        source: Box::new(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintrelay_types::Severity;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().expect("parent")).expect("mkdir");
        std::fs::write(path, content).expect("write");
    }

    #[test]
    fn run_lint_with_built_in_rules() {
        let td = TempDir::new().expect("temp");
        write(
            td.path(),
            "src/app.js",
            "function f() {\n  debugger;\n  console.log('hi');\n}\n",
        );

        let report = run_lint(td.path(), &LintOptions::default()).expect("lint");
        assert_eq!(report.counts.errors, 1);
        assert_eq!(report.counts.warnings, 1);
        assert!(report
            .diagnostics
            .iter()
            .any(|d| d.rule_id == "js.no_debugger" && d.line == 2));
    }

    #[test]
    fn run_lint_reads_config_file_from_root() {
        let td = TempDir::new().expect("temp");
        write(
            td.path(),
            CONFIG_FILE_NAME,
            r#"
[[rule]]
id = "custom.no_alert"
severity = "error"
message = "No alert."
patterns = ["\\balert\\s*\\("]
"#,
        );
        write(td.path(), "app.js", "alert('x');\ndebugger;\n");

        let report = run_lint(td.path(), &LintOptions::default()).expect("lint");
        // The config file replaces the built-in ruleset entirely.
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].rule_id, "custom.no_alert");
        assert_eq!(report.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn run_lint_rejects_malformed_config() {
        let td = TempDir::new().expect("temp");
        write(td.path(), CONFIG_FILE_NAME, "rule = \"not a table\"");

        let err = run_lint(td.path(), &LintOptions::default()).unwrap_err();
        assert!(matches!(err, EngineError::Config { .. }));
    }

    #[test]
    fn run_lint_honors_extension_override() {
        let td = TempDir::new().expect("temp");
        write(td.path(), "page.html", "<script>debugger;</script>\n");
        write(td.path(), "app.js", "debugger;\n");

        let options = LintOptions {
            extensions: vec![".html".to_string()],
            ..LintOptions::default()
        };
        let report = run_lint(td.path(), &options).expect("lint");
        assert_eq!(report.diagnostics.len(), 1);
        assert!(report.diagnostics[0].path.ends_with("page.html"));
    }

    #[test]
    fn run_lint_clean_tree_is_empty() {
        let td = TempDir::new().expect("temp");
        write(td.path(), "src/ok.js", "const x = 1;\nexport default x;\n");

        let report = run_lint(td.path(), &LintOptions::default()).expect("lint");
        assert!(report.diagnostics.is_empty());
        assert_eq!(report.counts, Default::default());
        assert_eq!(report.files_scanned, 1);
    }
}
