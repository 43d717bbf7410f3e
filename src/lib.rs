//! keel — layered build configuration resolver (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod config;
pub mod constants;
pub mod env;
pub mod models;
pub mod output;
pub mod platform;
pub mod project;
pub mod resolver;
