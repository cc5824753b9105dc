//! Login and signup client.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use stockroom::users::{Credentials, User};

use crate::remote::{ApiBase, RemoteError, RequestKind, ensure_success, read_json};

/// Session data returned by a successful login.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    /// Opaque session token, when the server issues one
    #[serde(default)]
    pub token: Option<String>,
}

/// Account endpoints of the REST API.
#[automock]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /login`.
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse, RemoteError>;

    /// `POST /signup`, returning the created account.
    async fn signup(&self, credentials: Credentials) -> Result<User, RemoteError>;
}

/// [`AuthApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpAuthApi {
    http: Client,
    base: ApiBase,
}

impl HttpAuthApi {
    /// Create a client sharing the given connection pool.
    #[must_use]
    pub fn new(http: Client, base: ApiBase) -> Self {
        Self { http, base }
    }
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    #[tracing::instrument(name = "auth.login", skip_all, fields(username = %credentials.username), err)]
    async fn login(&self, credentials: Credentials) -> Result<LoginResponse, RemoteError> {
        let response = self
            .http
            .post(self.base.endpoint(["login"]))
            .json(&credentials)
            .send()
            .await?;

        let response = ensure_success(response, RequestKind::Mutation).await?;
        let session: LoginResponse = read_json(response).await?;

        debug!(issued = session.token.is_some(), "login accepted");

        Ok(session)
    }

    #[tracing::instrument(name = "auth.signup", skip_all, fields(username = %credentials.username), err)]
    async fn signup(&self, credentials: Credentials) -> Result<User, RemoteError> {
        let response = self
            .http
            .post(self.base.endpoint(["signup"]))
            .json(&credentials)
            .send()
            .await?;

        let response = ensure_success(response, RequestKind::Mutation).await?;

        read_json(response).await
    }
}
