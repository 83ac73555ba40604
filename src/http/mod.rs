//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, layer stack)
//!     → middleware/request_log.rs (timing, every request)
//!     → middleware/validate_id.rs ({id} routes only, may short-circuit)
//!     → handlers.rs (store operation)
//!     → JSON response (error.rs for failures)
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use error::{ApiError, ErrorBody};
pub use server::{AppState, HttpServer};
