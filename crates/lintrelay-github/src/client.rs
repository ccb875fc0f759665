use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;

use lintrelay_types::{CheckOutput, Conclusion};

use crate::error::{RemoteApiError, Result};

/// Default API base; overridable for non-github.com deployments and tests.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// The check-runs API is only served under this preview media type.
const ACCEPT_CHECKS_PREVIEW: &str = "application/vnd.github.antiope-preview+json";

const USER_AGENT: &str = concat!("lintrelay/", env!("CARGO_PKG_VERSION"));

const STATUS_IN_PROGRESS: &str = "in_progress";
const STATUS_COMPLETED: &str = "completed";

/// Proof that a check run was created. The id is the sole state threaded from
/// creation to completion; with no public constructor, a completion call can
/// only ever reference a check run this client created.
#[derive(Debug)]
pub struct CheckRunHandle {
    id: u64,
}

impl CheckRunHandle {
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// Minimal client for the two-call check-run lifecycle.
pub struct CheckRunClient {
    http: Client,
    api_url: String,
    token: String,
    owner: String,
    repo: String,
    check_name: String,
    head_sha: String,
}

#[derive(Serialize)]
struct CreateCheckRequest<'a> {
    name: &'a str,
    head_sha: &'a str,
    status: &'static str,
    started_at: String,
}

#[derive(Deserialize)]
struct CreateCheckResponse {
    id: u64,
}

#[derive(Serialize)]
struct UpdateCheckRequest<'a> {
    name: &'a str,
    head_sha: &'a str,
    status: &'static str,
    completed_at: String,
    conclusion: Conclusion,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<&'a CheckOutput>,
}

impl CheckRunClient {
    pub fn new(
        api_url: impl Into<String>,
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        check_name: impl Into<String>,
        head_sha: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            api_url: api_url.into(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            check_name: check_name.into(),
            head_sha: head_sha.into(),
        })
    }

    /// Create the check run in `in_progress` state and return its handle.
    pub fn create(&self) -> Result<CheckRunHandle> {
        let url = self.check_runs_url();
        debug!("creating check run at {url}");

        let body = CreateCheckRequest {
            name: &self.check_name,
            head_sha: &self.head_sha,
            status: STATUS_IN_PROGRESS,
            started_at: Utc::now().to_rfc3339(),
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_CHECKS_PREVIEW)
            .json(&body)
            .send()?;

        let created: CreateCheckResponse = parse_success(response)?;
        debug!("check run {} created", created.id);
        Ok(CheckRunHandle { id: created.id })
    }

    /// Patch the check run to `completed` with the given conclusion.
    ///
    /// `output` is omitted on the orchestration-failure path, where no real
    /// lint output ever existed.
    pub fn complete(
        &self,
        check: &CheckRunHandle,
        conclusion: Conclusion,
        output: Option<&CheckOutput>,
    ) -> Result<()> {
        let url = format!("{}/{}", self.check_runs_url(), check.id());
        debug!(
            "completing check run {} with conclusion {}",
            check.id(),
            conclusion.as_str()
        );

        let body = UpdateCheckRequest {
            name: &self.check_name,
            head_sha: &self.head_sha,
            status: STATUS_COMPLETED,
            completed_at: Utc::now().to_rfc3339(),
            conclusion,
            output,
        };

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_CHECKS_PREVIEW)
            .json(&body)
            .send()?;

        ensure_success(response)?;
        Ok(())
    }

    fn check_runs_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/check-runs",
            self.api_url, self.owner, self.repo
        )
    }
}

fn parse_success<T: serde::de::DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_error(status.as_u16(), response));
    }
    let text = response.text().map_err(RemoteApiError::Http)?;
    serde_json::from_str(&text).map_err(|e| RemoteApiError::Parse(e.to_string()))
}

fn ensure_success(response: Response) -> Result<()> {
    let status = response.status();
    if !status.is_success() {
        return Err(api_error(status.as_u16(), response));
    }
    Ok(())
}

fn api_error(status: u16, response: Response) -> RemoteApiError {
    let body = response.text().unwrap_or_default();
    RemoteApiError::Api { status, body }
}
