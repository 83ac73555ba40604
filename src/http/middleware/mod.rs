//! Request pipeline stages.
//!
//! # Ordering
//! ```text
//! request id → log_request (every route) → validate_id ({id} routes only) → handler
//! ```

pub mod request_log;
pub mod validate_id;

pub use request_log::log_request;
pub use validate_id::validate_id;
