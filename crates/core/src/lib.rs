//! Stockroom
//!
//! Domain types for the Stockroom inventory administration client: products
//! and users as the REST API serves them, the form drafts used to create and
//! edit them, and text renderings for tables and the stock dashboard.

pub mod ids;
pub mod prelude;
pub mod presentation;
pub mod price;
pub mod products;
pub mod resource;
pub mod users;
pub mod validation;
