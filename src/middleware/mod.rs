//! Custom middleware implementations for the API.
//!
//! Request IDs and metrics collection wrap every route.

pub mod metrics;
pub mod request_id;

pub use metrics::*;
pub use request_id::*;
