//! Utility functions and helper modules.

pub mod http;
pub mod redact;

pub use http::*;
pub use redact::*;
