//! Remote Collections
//!
//! Thin clients for the REST API: one [`RemoteCollection`] per resource,
//! rooted at an [`ApiBase`].

use std::{fmt, str::FromStr};

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};
use thiserror::Error;

use stockroom::{ids::TypedId, resource::Resource};

mod client;
mod errors;

pub use client::HttpCollection;
pub use errors::RemoteError;

/// API base used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Single-attempt CRUD access to one remote collection.
///
/// Implementations never retry: every call maps to at most one request.
#[automock]
#[async_trait]
pub trait RemoteCollection<R: Resource>: Send + Sync {
    /// Fetch every entity in the collection.
    async fn list(&self) -> Result<Vec<R::Entity>, RemoteError>;

    /// Create an entity from the payload.
    async fn create(&self, payload: R::Payload) -> Result<R::Entity, RemoteError>;

    /// Replace the entity with the given identifier.
    async fn update(
        &self,
        id: TypedId<R::Entity>,
        payload: R::Payload,
    ) -> Result<R::Entity, RemoteError>;

    /// Delete the entity with the given identifier.
    async fn delete(&self, id: TypedId<R::Entity>) -> Result<(), RemoteError>;
}

/// The provided API base is not usable as a URL prefix.
#[derive(Debug, Error)]
pub enum InvalidApiBase {
    /// The text is not a URL.
    #[error("invalid API URL: {0}")]
    Parse(#[from] url::ParseError),

    /// The URL cannot have path segments appended.
    #[error("API URL cannot carry paths: {0}")]
    NotABase(String),
}

/// Root URL of the REST API, e.g. `http://localhost:5000/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// Parse an API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL is malformed or cannot have path
    /// segments appended (e.g. `mailto:` URLs).
    pub fn parse(url: &str) -> Result<Self, InvalidApiBase> {
        let parsed = Url::parse(url)?;

        if parsed.cannot_be_a_base() {
            return Err(InvalidApiBase::NotABase(url.to_string()));
        }

        Ok(Self(parsed))
    }

    /// URL of `segments` below the base; each segment is percent-encoded.
    #[must_use]
    pub fn endpoint<I>(&self, segments: I) -> Url
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.0.clone();

        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        url
    }
}

impl FromStr for ApiBase {
    type Err = InvalidApiBase;

    fn from_str(url: &str) -> Result<Self, Self::Err> {
        Self::parse(url)
    }
}

impl fmt::Display for ApiBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Which kind of request a failure belongs to; listings report 404 as a
/// missing route rather than a missing entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RequestKind {
    Listing,
    Mutation,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pass successful responses through; turn anything else into a
/// [`RemoteError`] carrying the server's message.
pub(crate) async fn ensure_success(
    response: Response,
    kind: RequestKind,
) -> Result<Response, RemoteError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = server_message(&body, status);

    if status == StatusCode::NOT_FOUND && kind == RequestKind::Listing {
        return Err(RemoteError::RouteNotFound { message });
    }

    Err(RemoteError::Server { status, message })
}

/// Read a success body as JSON.
pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, RemoteError> {
    let bytes = response.bytes().await?;

    serde_json::from_slice(&bytes).map_err(RemoteError::Parse)
}

/// Prefer a JSON `message` field, then the raw text, then the status reason.
pub(crate) fn server_message(body: &str, status: StatusCode) -> String {
    if let Ok(ErrorBody { message }) = serde_json::from_str::<ErrorBody>(body) {
        return message;
    }

    let text = body.trim();

    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        text.to_string()
    }
}
