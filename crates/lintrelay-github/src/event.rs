use std::path::{Path, PathBuf};

use serde::Deserialize;

/// The slice of the event-metadata file this tool cares about: the repository
/// the run is reporting against.
#[derive(Debug, Clone, Deserialize)]
pub struct EventPayload {
    pub repository: Repository,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Repository {
    pub name: String,
    pub owner: RepositoryOwner,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryOwner {
    pub login: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to read event file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse event file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read the event file once and extract owner/repo.
pub fn load_event(path: &Path) -> Result<EventPayload, EventError> {
    let text = std::fs::read_to_string(path).map_err(|e| EventError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    serde_json::from_str(&text).map_err(|e| EventError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_and_repo() {
        let payload: EventPayload = serde_json::from_str(
            r#"{
                "action": "synchronize",
                "repository": {
                    "name": "widget",
                    "owner": { "login": "acme" },
                    "private": false
                }
            }"#,
        )
        .expect("parse");
        assert_eq!(payload.repository.owner.login, "acme");
        assert_eq!(payload.repository.name, "widget");
    }

    #[test]
    fn missing_file_is_io_error() {
        let td = tempfile::TempDir::new().expect("temp");
        let err = load_event(&td.path().join("event.json")).unwrap_err();
        assert!(matches!(err, EventError::Io { .. }));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let td = tempfile::TempDir::new().expect("temp");
        let path = td.path().join("event.json");
        std::fs::write(&path, "{\"repository\": 42}").expect("write");
        let err = load_event(&path).unwrap_err();
        assert!(matches!(err, EventError::Parse { .. }));
    }
}
