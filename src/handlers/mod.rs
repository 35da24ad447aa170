//! HTTP request handlers for API endpoints.
//!
//! This module contains all the HTTP request handlers that process
//! incoming requests and generate responses.

pub mod health;
pub mod metrics;
pub mod notifications;
pub mod openapi;
pub mod rate_limit;
pub mod totp;
pub mod version;

pub use health::*;
pub use metrics::*;
pub use notifications::*;
pub use openapi::*;
pub use totp::*;
pub use version::*;
