//! Environment resolution.
//!
//! Every ambient input (commit, token, workspace, optional overrides) is read
//! exactly once here and collected into an explicit `RunContext`; no other
//! component consults the environment.

use std::path::PathBuf;

use anyhow::{Context, Result};

use lintrelay_engine::LintOptions;
use lintrelay_github::{load_event, DEFAULT_API_URL};
use lintrelay_types::{ReportCaps, DEFAULT_EXTENSIONS};

use crate::Cli;

/// Everything a run needs, resolved once at process start.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub head_sha: String,
    pub token: String,
    pub workspace: PathBuf,
    pub owner: String,
    pub repo: String,
    pub api_url: String,
    pub files: Vec<String>,
    pub extensions: Vec<String>,
    pub include_warnings: bool,
    pub config_path: Option<PathBuf>,
    pub caps: ReportCaps,
}

impl RunContext {
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let head_sha = require_env("GITHUB_SHA")?;
        let token = require_env("GITHUB_TOKEN")?;
        let workspace = PathBuf::from(require_env("GITHUB_WORKSPACE")?);

        let event_path = PathBuf::from(require_env("GITHUB_EVENT_PATH")?);
        let event = load_event(&event_path).context("load event metadata")?;

        let files = cli
            .files
            .clone()
            .or_else(|| optional_env("INPUT_FILES"))
            .map(|s| split_list(&s))
            .unwrap_or_else(|| vec![".".to_string()]);

        let extensions = cli
            .extensions
            .clone()
            .or_else(|| optional_env("INPUT_EXTENSIONS"))
            .map(|s| split_list(&s))
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect());

        let include_warnings = cli.warnings
            || optional_env("INPUT_WARNINGS")
                .is_some_and(|v| parse_bool(&v));

        let api_url = cli
            .api_url
            .clone()
            .or_else(|| optional_env("GITHUB_API_URL"))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Ok(Self {
            head_sha,
            token,
            workspace,
            owner: event.repository.owner.login,
            repo: event.repository.name,
            api_url,
            files,
            extensions,
            include_warnings,
            config_path: cli.config.clone(),
            caps: ReportCaps {
                max_annotations: cli.max_annotations,
                console_limit: cli.console_limit,
            },
        })
    }

    pub fn lint_options(&self) -> LintOptions {
        LintOptions {
            files: self.files.clone(),
            extensions: self.extensions.clone(),
            config_path: self.config_path.clone(),
            ..LintOptions::default()
        }
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).with_context(|| format!("environment variable {name} is not set"))
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_drops_empties() {
        assert_eq!(
            split_list(" .js, .jsx ,,  .tsx"),
            vec![".js", ".jsx", ".tsx"]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn parse_bool_accepts_common_truthy_tokens() {
        for truthy in ["1", "true", "TRUE", "yes", "On"] {
            assert!(parse_bool(truthy), "{truthy} should be truthy");
        }
        for falsy in ["", "0", "false", "off", "nope"] {
            assert!(!parse_bool(falsy), "{falsy} should be falsy");
        }
    }
}
