//! Movie registry
//!
//! An in-memory movie store served as a JSON CRUD API over HTTP/1.

pub mod api;
pub mod config;
pub mod logger;
pub mod movies;
pub mod routing;
pub mod server;
