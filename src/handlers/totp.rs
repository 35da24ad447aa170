//! Two-factor verification endpoint handler.

use crate::{
    config::{RateLimitPreset, TotpConfig},
    error::ApiError,
    handlers::rate_limit::{enforce_rate_limit, ok_with_limits},
    models::{TotpVerifyRequest, TotpVerifyResponse},
    services::totp::{decode_secret, verify_code},
};
use actix_web::{Error, HttpRequest, HttpResponse, Result, web};
use chrono::Utc;
use paperclip::actix::api_v2_operation;

/// Verify a TOTP code against a caller-supplied secret
///
/// The secret travels with the request and nothing is stored server-side,
/// so `valid` says nothing about who the caller is. Strict preset.
#[api_v2_operation(
    summary = "Verify Two-Factor Code",
    description = "Demo endpoint: checks a time-based one-time password (RFC 6238, HMAC-SHA256) against a hex-encoded secret supplied in the same request. A valid result only shows the code matches that secret; it does not authenticate the caller, since no secret is stored server-side.",
    tags("Two-Factor"),
    responses(
        (status = 200, description = "Verification result", body = TotpVerifyResponse),
        (status = 400, description = "Missing fields or malformed secret"),
        (status = 429, description = "Too Many Requests")
    )
)]
pub async fn verify_totp(
    req: HttpRequest,
    payload: web::Json<TotpVerifyRequest>,
) -> Result<HttpResponse, Error> {
    let decision = enforce_rate_limit(&req, RateLimitPreset::Strict)?;

    if payload.secret.trim().is_empty() || payload.code.trim().is_empty() {
        return Err(ApiError::Validation("Missing required fields: secret, code".into()).into());
    }

    let config = req
        .app_data::<web::Data<TotpConfig>>()
        .map(|config| *config.get_ref())
        .unwrap_or_default();

    let secret = decode_secret(&payload.secret).map_err(ApiError::from)?;
    let now = u64::try_from(Utc::now().timestamp()).unwrap_or(0);
    let valid = verify_code(&secret, &payload.code, now, &config).map_err(ApiError::from)?;

    if !valid {
        tracing::info!(target: "two_factor", path = %req.path(), "Two-factor code rejected");
    }

    Ok(ok_with_limits(decision.as_ref()).json(TotpVerifyResponse { valid }))
}
