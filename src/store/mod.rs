//! Repository storage subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → id.rs (format check, fresh ids)
//!     → memory.rs (ordered in-memory collection)
//!     → repository.rs (record + request body types)
//! ```
//!
//! # Design Decisions
//! - The store is the single source of truth and lives for the process lifetime
//! - Insertion order is preserved; updates replace in place
//! - Every read-modify-write runs under one lock acquisition

pub mod id;
pub mod memory;
pub mod repository;

use thiserror::Error;
use uuid::Uuid;

pub use memory::RepositoryStore;
pub use repository::{Repository, RepositoryInput};

/// Errors returned by store lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record carries the requested id.
    #[error("repository {0} not found")]
    NotFound(Uuid),
}
