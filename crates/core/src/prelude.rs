//! Stockroom prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    ids::{RawId, TypedId},
    presentation::{
        RenderError, write_dashboard, write_products_table, write_stock_chart, write_users_table,
    },
    price::Price,
    products::{Product, ProductDraft, ProductId, ProductPayload, Products},
    resource::{Resource, Resync},
    users::{Credentials, User, UserDraft, UserId, Users},
    validation::ValidationError,
};
