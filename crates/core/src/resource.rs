//! Resources
//!
//! A [`Resource`] describes one remotely managed collection: where it lives
//! below the API base, what its entities and form drafts look like, and how a
//! client keeps its local copy in step with the server after a mutation.

use std::fmt::Debug;

use serde::{Serialize, de::DeserializeOwned};

use crate::{ids::TypedId, validation::ValidationError};

/// How a local list is brought back in line with the server after a
/// successful mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resync {
    /// Fetch the whole collection again and replace the local copy.
    Refetch,

    /// Apply the mutation to the local copy: append on create, replace by
    /// identifier on update, remove by identifier on delete.
    Patch,
}

/// A remotely managed collection.
pub trait Resource: Send + Sync + 'static {
    /// Entity as returned by the server.
    type Entity: Clone + Debug + DeserializeOwned + Send + Sync + 'static;

    /// Editable form state, every field held as raw text.
    type Draft: Clone + Debug + Default + PartialEq + Send + Sync + 'static;

    /// Validated request body for create and update.
    type Payload: Clone + Debug + PartialEq + Serialize + Send + Sync + 'static;

    /// Path segment below the API base, e.g. `products`.
    const PATH: &'static str;

    /// Singular noun used in messages, e.g. `product`.
    const SINGULAR: &'static str;

    /// Plural noun used in messages, e.g. `products`.
    const PLURAL: &'static str;

    /// Re-synchronization policy applied after mutations.
    const RESYNC: Resync;

    /// Identifier of an entity.
    fn id(entity: &Self::Entity) -> &TypedId<Self::Entity>;

    /// Draft pre-filled from an entity that is about to be edited.
    fn edit_draft(entity: &Self::Entity) -> Self::Draft;

    /// Check a draft and turn it into a request body.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when a required field is blank or a
    /// field cannot be interpreted.
    fn validate(draft: &Self::Draft) -> Result<Self::Payload, ValidationError>;
}
