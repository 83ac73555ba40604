//! Rust client for the repositories API.

mod client;

pub use client::{ClientError, NewRepository, RepositoriesClient, Repository};
