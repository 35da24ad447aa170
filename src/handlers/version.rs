//! Version information endpoint handler.

use crate::{
    config::RateLimitPreset,
    handlers::rate_limit::{enforce_rate_limit, ok_with_limits},
    models::VersionResponse,
};
use actix_web::{Error, HttpRequest, HttpResponse, Result};
use paperclip::actix::api_v2_operation;

/// Version information endpoint
///
/// Rate limited with the relaxed preset.
#[api_v2_operation(
    summary = "Version Information Endpoint",
    description = "Returns the service name and version.",
    tags("Version"),
    responses(
        (status = 200, description = "Successful response", body = VersionResponse),
        (status = 429, description = "Too Many Requests")
    )
)]
pub async fn version(req: HttpRequest) -> Result<HttpResponse, Error> {
    let decision = enforce_rate_limit(&req, RateLimitPreset::Relaxed)?;

    Ok(ok_with_limits(decision.as_ref()).json(VersionResponse {
        name: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}
