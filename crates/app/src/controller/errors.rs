//! Controller errors.

use std::fmt;

use thiserror::Error;

use stockroom::validation::ValidationError;

use crate::remote::RemoteError;

/// What the controller was attempting when something went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing the collection.
    Fetch,

    /// Creating an entity.
    Create,

    /// Replacing an entity.
    Update,

    /// Deleting an entity.
    Delete,

    /// Selling one unit of a product.
    Sell,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fetch => "fetch",
            Self::Create => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Sell => "sell",
        })
    }
}

/// Business-rule failures detected without a server round trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// The product is not cached or has no units left.
    #[error("Product is out of stock")]
    OutOfStock,

    /// The entity to edit is not in the cached list.
    #[error("{resource} {id} is not in the current list")]
    NotLoaded {
        /// Singular resource noun.
        resource: &'static str,

        /// Identifier that was looked up.
        id: String,
    },
}

/// Any failure surfaced by a CRUD controller.
#[derive(Debug, Error)]
pub enum CrudError {
    /// The server could not be reached or rejected the request.
    #[error("Failed to {operation} {resource}: {source}")]
    Remote {
        /// What was being attempted.
        operation: Operation,

        /// Resource noun used in the message.
        resource: &'static str,

        /// Underlying request failure.
        #[source]
        source: RemoteError,
    },

    /// The draft failed the client-side check; nothing was sent.
    #[error("Invalid {resource}: {source}")]
    Validation {
        /// Singular resource noun.
        resource: &'static str,

        /// Offending field.
        #[source]
        source: ValidationError,
    },

    /// A business rule refused the action; nothing was sent.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl CrudError {
    /// The underlying remote failure, if any.
    #[must_use]
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote { source, .. } => Some(source),
            Self::Validation { .. } | Self::Domain(_) => None,
        }
    }
}
