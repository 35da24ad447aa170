//! Data models for requests, responses, and internal state.

pub mod api;
pub mod notification;
pub mod rate_limit;

pub use api::*;
pub use notification::*;
pub use rate_limit::*;
