//! Business logic and service layer modules.
//!
//! This module contains the core services of the application: rate
//! limiting, notification dispatch, two-factor codes, and metrics.

pub mod clock;
pub mod metrics;
pub mod notifications;
pub mod rate_limit;
pub mod sweeper;
pub mod totp;

pub use clock::*;
pub use metrics::*;
pub use notifications::{NotificationDispatcher, NotificationError};
pub use rate_limit::*;
pub use sweeper::*;
