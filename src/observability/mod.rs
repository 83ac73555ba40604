//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request logger middleware produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters, histograms, store gauge)
//!
//! Consumers:
//!     → stdout (pretty or JSON lines)
//!     → Metrics endpoint (Prometheus scrape, optional)
//! ```
//!
//! # Design Decisions
//! - Request ID flows into every request log event
//! - Metrics macros are no-ops until a recorder is installed

pub mod logging;
pub mod metrics;
