//! Per-route rate limiting shared by the handlers.

use crate::{
    config::RateLimitPreset,
    error::ApiError,
    models::RateLimitDecision,
    services::{AppMetrics, RateLimiter},
    utils::http::rate_limit_identifiers,
};
use actix_web::{HttpRequest, HttpResponse, HttpResponseBuilder, web};

/// Count this request against `preset` for every identifier of the caller
///
/// The most restrictive decision wins. Returns `Ok(None)` when no limiter
/// is registered with the app.
pub fn enforce_rate_limit(
    req: &HttpRequest,
    preset: RateLimitPreset,
) -> Result<Option<RateLimitDecision>, ApiError> {
    let Some(limiter) = req.app_data::<web::Data<RateLimiter>>() else {
        return Ok(None);
    };

    let mut strictest: Option<(String, RateLimitDecision)> = None;
    for identifier in rate_limit_identifiers(req) {
        let decision = limiter.check_preset(&identifier, preset);
        let replace = match &strictest {
            None => true,
            Some((_, current)) => is_stricter(&decision, current),
        };
        if replace {
            strictest = Some((identifier, decision));
        }
    }

    let Some((identifier, decision)) = strictest else {
        return Ok(None);
    };
    if decision.allowed {
        return Ok(Some(decision));
    }

    tracing::warn!(
        target: "rate_limit",
        bucket = %preset.bucket_key(&identifier),
        path = %req.path(),
        retry_after_secs = decision.retry_after_secs.unwrap_or(0),
        "Rate limit exceeded"
    );
    if let Some(metrics) = req.app_data::<web::Data<AppMetrics>>() {
        metrics.record_rate_limit_rejection(preset.name());
    }

    Err(ApiError::RateLimited(decision))
}

fn is_stricter(candidate: &RateLimitDecision, current: &RateLimitDecision) -> bool {
    match (candidate.allowed, current.allowed) {
        (false, true) => true,
        (true, false) => false,
        (false, false) => candidate.retry_after_secs > current.retry_after_secs,
        (true, true) => candidate.remaining < current.remaining,
    }
}

/// `200 OK` builder carrying the rate-limit headers of `decision`
pub fn ok_with_limits(decision: Option<&RateLimitDecision>) -> HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    for header in decision.iter().flat_map(|d| d.headers()) {
        builder.insert_header(header);
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_without_limiter_everything_passes() {
        let req = TestRequest::default().to_http_request();
        assert!(enforce_rate_limit(&req, RateLimitPreset::Strict).unwrap().is_none());
    }

    #[test]
    fn test_strict_preset_rejects_sixth_request() {
        let req = TestRequest::default()
            .app_data(web::Data::new(RateLimiter::new()))
            .insert_header(("X-Forwarded-For", "203.0.113.9"))
            .to_http_request();

        for _ in 0..5 {
            assert!(enforce_rate_limit(&req, RateLimitPreset::Strict).is_ok());
        }

        match enforce_rate_limit(&req, RateLimitPreset::Strict) {
            Err(ApiError::RateLimited(decision)) => {
                assert_eq!(decision.limit, 5);
                assert!(decision.retry_after_secs.is_some());
            }
            other => panic!("expected rate limit rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_rotating_wallets_share_ip_bucket() {
        let limiter = web::Data::new(RateLimiter::new());

        for i in 0..6 {
            let req = TestRequest::default()
                .app_data(limiter.clone())
                .insert_header(("X-Forwarded-For", "203.0.113.50"))
                .insert_header(("X-Wallet-Address", format!("0x{i:040x}")))
                .to_http_request();

            let result = enforce_rate_limit(&req, RateLimitPreset::Strict);
            if i < 5 {
                assert!(result.is_ok(), "request {i}");
            } else {
                assert!(matches!(result, Err(ApiError::RateLimited(_))));
            }
        }
    }

    #[test]
    fn test_wallet_bucket_reports_lower_remaining() {
        let limiter = web::Data::new(RateLimiter::new());
        let wallet = "0x52908400098527886e0f7030069857d2e4169ee7";

        let from_ip = |ip: &str| {
            TestRequest::default()
                .app_data(limiter.clone())
                .insert_header(("X-Forwarded-For", ip))
                .insert_header(("X-Wallet-Address", wallet))
                .to_http_request()
        };

        enforce_rate_limit(&from_ip("198.51.100.1"), RateLimitPreset::Strict).unwrap();
        let decision = enforce_rate_limit(&from_ip("198.51.100.2"), RateLimitPreset::Strict)
            .unwrap()
            .unwrap();

        // Fresh IP bucket has 4 left; the wallet bucket has 3
        assert_eq!(decision.remaining, 3);
    }

    #[test]
    fn test_ok_with_limits_sets_headers() {
        let req = TestRequest::default()
            .app_data(web::Data::new(RateLimiter::new()))
            .to_http_request();
        let decision = enforce_rate_limit(&req, RateLimitPreset::Relaxed).unwrap();

        let response = ok_with_limits(decision.as_ref()).finish();
        assert_eq!(response.headers().get("x-ratelimit-limit").unwrap(), "100");
        assert_eq!(response.headers().get("x-ratelimit-remaining").unwrap(), "99");
    }
}
