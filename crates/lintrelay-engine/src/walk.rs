use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::debug;
use walkdir::WalkDir;

use crate::EngineError;

/// Discover lintable files under `root`.
///
/// Each entry of `files` is resolved relative to `root` and may name a file or
/// a directory; directories are walked recursively. A file survives discovery
/// when its name ends with one of `extensions` and its root-relative path is
/// not matched by the ignore set. Returned paths are relative to `root`, in a
/// deterministic walk order.
pub fn discover_files(
    root: &Path,
    files: &[String],
    extensions: &[String],
    ignore: &IgnoreSet,
) -> Result<Vec<PathBuf>, EngineError> {
    let mut out = Vec::new();

    for entry in files {
        let start = root.join(entry);
        for item in WalkDir::new(&start)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.file_name() != ".git")
        {
            let item = item.map_err(|e| EngineError::Walk {
                path: start.clone(),
                source: e,
            })?;
            if !item.file_type().is_file() {
                continue;
            }

            let Ok(rel) = item.path().strip_prefix(root) else {
                // Explicit file entries outside the root are taken as-is.
                out.push(item.path().to_path_buf());
                continue;
            };

            if !has_matching_extension(rel, extensions) {
                continue;
            }
            if ignore.is_match(rel) {
                debug!("ignoring {}", rel.display());
                continue;
            }
            out.push(rel.to_path_buf());
        }
    }

    Ok(out)
}

fn has_matching_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions.iter().any(|ext| name.ends_with(ext.as_str()))
}

/// Glob patterns loaded from an ignore file.
#[derive(Debug, Default)]
pub struct IgnoreSet {
    globs: Option<GlobSet>,
}

impl IgnoreSet {
    /// Load ignore patterns from `path`. A missing file yields an empty set;
    /// any other read failure is an error.
    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let text = match std::fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no ignore file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(EngineError::Io {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        Self::parse(&text, path)
    }

    fn parse(text: &str, path: &Path) -> Result<Self, EngineError> {
        let mut builder = GlobSetBuilder::new();
        let mut any = false;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }
            let pattern = line.trim_start_matches('/').trim_end_matches('/');
            if pattern.is_empty() {
                continue;
            }

            // Each entry matches the path itself and anything beneath it, at
            // any depth, which covers the common ignore-file shapes.
            for candidate in [
                pattern.to_string(),
                format!("{pattern}/**"),
                format!("**/{pattern}"),
                format!("**/{pattern}/**"),
            ] {
                let glob = Glob::new(&candidate).map_err(|e| EngineError::IgnorePattern {
                    path: path.to_path_buf(),
                    pattern: line.to_string(),
                    source: e,
                })?;
                builder.add(glob);
                any = true;
            }
        }

        let globs = if any {
            Some(builder.build().expect("globset build should succeed"))
        } else {
            None
        };
        Ok(Self { globs })
    }

    pub fn is_match(&self, path: &Path) -> bool {
        self.globs.as_ref().is_some_and(|g| g.is_match(path))
    }
}
