use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use regex::Regex;

use lintrelay_types::{RuleConfig, Severity};

#[derive(Debug, thiserror::Error)]
pub enum RuleCompileError {
    #[error("rule '{rule_id}' has no patterns")]
    MissingPatterns { rule_id: String },

    #[error("rule '{rule_id}' has invalid regex '{pattern}': {source}")]
    InvalidRegex {
        rule_id: String,
        pattern: String,
        source: regex::Error,
    },

    #[error("rule '{rule_id}' has invalid glob '{glob}': {source}")]
    InvalidGlob {
        rule_id: String,
        glob: String,
        source: globset::Error,
    },
}

#[derive(Debug, Clone)]
pub struct CompiledRule {
    pub id: String,
    pub severity: Severity,
    pub message: String,
    pub patterns: Vec<Regex>,
    pub include: Option<GlobSet>,
    pub exclude: Option<GlobSet>,
}

impl CompiledRule {
    pub fn applies_to(&self, path: &Path) -> bool {
        if let Some(include) = &self.include {
            if !include.is_match(path) {
                return false;
            }
        }

        if let Some(exclude) = &self.exclude {
            if exclude.is_match(path) {
                return false;
            }
        }

        true
    }
}

pub fn compile_rules(configs: &[RuleConfig]) -> Result<Vec<CompiledRule>, RuleCompileError> {
    let mut out = Vec::with_capacity(configs.len());

    for cfg in configs {
        if cfg.patterns.is_empty() {
            return Err(RuleCompileError::MissingPatterns {
                rule_id: cfg.id.clone(),
            });
        }

        let mut patterns = Vec::with_capacity(cfg.patterns.len());
        for p in &cfg.patterns {
            let r = Regex::new(p).map_err(|e| RuleCompileError::InvalidRegex {
                rule_id: cfg.id.clone(),
                pattern: p.clone(),
                source: e,
            })?;
            patterns.push(r);
        }

        let include = compile_globs(&cfg.paths, &cfg.id)?;
        let exclude = compile_globs(&cfg.exclude_paths, &cfg.id)?;

        out.push(CompiledRule {
            id: cfg.id.clone(),
            severity: cfg.severity,
            message: cfg.message.clone(),
            patterns,
            include,
            exclude,
        });
    }

    Ok(out)
}

fn compile_globs(globs: &[String], rule_id: &str) -> Result<Option<GlobSet>, RuleCompileError> {
    if globs.is_empty() {
        return Ok(None);
    }

    let mut builder = GlobSetBuilder::new();
    for g in globs {
        let glob = Glob::new(g).map_err(|e| RuleCompileError::InvalidGlob {
            rule_id: rule_id.to_string(),
            glob: g.clone(),
            source: e,
        })?;
        builder.add(glob);
    }

    Ok(Some(builder.build().expect("globset build should succeed")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(id: &str, patterns: Vec<&str>, paths: Vec<&str>, exclude: Vec<&str>) -> RuleConfig {
        RuleConfig {
            id: id.to_string(),
            severity: Severity::Warning,
            message: "m".to_string(),
            patterns: patterns.into_iter().map(String::from).collect(),
            paths: paths.into_iter().map(String::from).collect(),
            exclude_paths: exclude.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn compile_and_match_basic_rule() {
        let compiled = compile_rules(&[rule(
            "js.no_console",
            vec![r"\bconsole\.log\("],
            vec!["**/*.js"],
            vec!["**/vendor/**"],
        )])
        .expect("compile");

        let r = &compiled[0];
        assert!(r.applies_to(Path::new("src/app.js")));
        assert!(!r.applies_to(Path::new("src/app.py")));
        assert!(!r.applies_to(Path::new("src/vendor/lib.js")));
        assert!(r.patterns[0].is_match("console.log('x')"));
    }

    #[test]
    fn rule_without_globs_applies_everywhere() {
        let compiled = compile_rules(&[rule("x", vec!["y"], vec![], vec![])]).expect("compile");
        assert!(compiled[0].applies_to(Path::new("anything/at/all.txt")));
    }

    #[test]
    fn empty_patterns_are_rejected() {
        let err = compile_rules(&[rule("empty", vec![], vec![], vec![])]).unwrap_err();
        assert!(matches!(err, RuleCompileError::MissingPatterns { rule_id } if rule_id == "empty"));
    }

    #[test]
    fn invalid_regex_is_rejected_with_context() {
        let err = compile_rules(&[rule("bad", vec!["("], vec![], vec![])]).unwrap_err();
        match err {
            RuleCompileError::InvalidRegex { rule_id, pattern, .. } => {
                assert_eq!(rule_id, "bad");
                assert_eq!(pattern, "(");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_glob_is_rejected_with_context() {
        let err = compile_rules(&[rule("bad", vec!["x"], vec!["["], vec![])]).unwrap_err();
        assert!(matches!(err, RuleCompileError::InvalidGlob { glob, .. } if glob == "["));
    }
}
