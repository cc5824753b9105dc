//! Stockroom Admin Client
//!
//! Controllers, REST clients and the session gate behind the `stockroom`
//! command line tool.

pub mod config;
pub mod context;
pub mod controller;
pub mod observability;
pub mod remote;
pub mod session;

#[cfg(test)]
mod test;
