//! API response models for standard endpoints.

use paperclip::actix::Apiv2Schema;
use serde::{Deserialize, Serialize};

/// Response model for the health check endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response model for the version information endpoint
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct VersionResponse {
    pub name: String,
    pub version: String,
}

/// Request body for two-factor code verification
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct TotpVerifyRequest {
    /// Shared secret, hex encoded
    #[serde(default)]
    pub secret: String,
    /// Code shown by the authenticator
    #[serde(default)]
    pub code: String,
}

/// Response body for two-factor code verification
#[derive(Clone, Serialize, Deserialize, Apiv2Schema)]
pub struct TotpVerifyResponse {
    pub valid: bool,
}
