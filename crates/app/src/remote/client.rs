//! HTTP implementation of [`RemoteCollection`].

use std::{fmt, marker::PhantomData};

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use stockroom::{ids::TypedId, resource::Resource};

use super::{
    ApiBase, RemoteCollection, RemoteError, RequestKind, ensure_success, read_json,
};

/// REST client for the collection at `{base}/{R::PATH}`.
pub struct HttpCollection<R> {
    http: Client,
    base: ApiBase,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> HttpCollection<R> {
    /// Create a client sharing the given connection pool.
    #[must_use]
    pub fn new(http: Client, base: ApiBase) -> Self {
        Self {
            http,
            base,
            resource: PhantomData,
        }
    }

    fn collection_url(&self) -> Url {
        self.base.endpoint([R::PATH])
    }

    fn item_url(&self, id: &TypedId<R::Entity>) -> Url {
        self.base.endpoint([R::PATH.to_string(), id.to_string()])
    }
}

impl<R> Clone for HttpCollection<R> {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            base: self.base.clone(),
            resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for HttpCollection<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCollection")
            .field("url", &self.collection_url().as_str())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<R: Resource> RemoteCollection<R> for HttpCollection<R> {
    #[tracing::instrument(name = "remote.list", skip(self), fields(resource = R::PATH), err)]
    async fn list(&self) -> Result<Vec<R::Entity>, RemoteError> {
        let response = self.http.get(self.collection_url()).send().await?;
        let response = ensure_success(response, RequestKind::Listing).await?;

        let entities: Vec<R::Entity> = read_json(response).await?;

        debug!(count = entities.len(), "listed {}", R::PLURAL);

        Ok(entities)
    }

    #[tracing::instrument(
        name = "remote.create",
        skip(self, payload),
        fields(resource = R::PATH),
        err
    )]
    async fn create(&self, payload: R::Payload) -> Result<R::Entity, RemoteError> {
        let response = self
            .http
            .post(self.collection_url())
            .json(&payload)
            .send()
            .await?;

        let response = ensure_success(response, RequestKind::Mutation).await?;

        read_json(response).await
    }

    #[tracing::instrument(
        name = "remote.update",
        skip(self, id, payload),
        fields(resource = R::PATH, id = %id),
        err
    )]
    async fn update(
        &self,
        id: TypedId<R::Entity>,
        payload: R::Payload,
    ) -> Result<R::Entity, RemoteError> {
        let response = self
            .http
            .put(self.item_url(&id))
            .json(&payload)
            .send()
            .await?;

        let response = ensure_success(response, RequestKind::Mutation).await?;

        read_json(response).await
    }

    #[tracing::instrument(
        name = "remote.delete",
        skip(self, id),
        fields(resource = R::PATH, id = %id),
        err
    )]
    async fn delete(&self, id: TypedId<R::Entity>) -> Result<(), RemoteError> {
        let response = self.http.delete(self.item_url(&id)).send().await?;

        // Any body on a successful delete is ignored, empty or not.
        ensure_success(response, RequestKind::Mutation).await?;

        Ok(())
    }
}
