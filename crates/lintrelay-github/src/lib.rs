//! Check-run REST client: exactly two authenticated calls against the hosting
//! platform (create the run as `in_progress`, patch it to `completed`), plus
//! the event-payload parsing that yields the owner/repo pair.

mod client;
mod error;
mod event;

pub use client::{CheckRunClient, CheckRunHandle, DEFAULT_API_URL};
pub use error::{RemoteApiError, Result};
pub use event::{load_event, EventError, EventPayload, Repository, RepositoryOwner};
