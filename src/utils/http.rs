//! Caller identification for rate limiting and logging.

use actix_web::HttpRequest;

/// Header carrying the caller's connected wallet
pub const WALLET_HEADER: &str = "X-Wallet-Address";

/// Extract client IP address from request headers
///
/// Attempts to extract the real client IP from common proxy headers,
/// falling back to the connection peer address.
pub fn extract_client_ip(req: &HttpRequest) -> Option<String> {
    const IP_HEADERS: [&str; 4] = [
        "X-Forwarded-For",
        "X-Real-IP",
        "CF-Connecting-IP", // Cloudflare
        "X-Cluster-Client-IP",
    ];

    let from_headers = IP_HEADERS.iter().find_map(|name| {
        let value = req.headers().get(*name)?.to_str().ok()?;
        // X-Forwarded-For may list a chain; the first hop is the client
        let ip = value.split(',').next()?.trim();
        (!ip.is_empty()).then(|| ip.to_string())
    });

    from_headers.or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
}

/// Wallet address from [`WALLET_HEADER`], lower-cased, if well formed
pub fn extract_wallet_address(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(WALLET_HEADER)?.to_str().ok()?.trim();
    is_wallet_address(value).then(|| value.to_lowercase())
}

/// `0x` followed by 40 hex digits
pub fn is_wallet_address(value: &str) -> bool {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .is_some_and(|hex| hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Network identity of the caller: `ip:<addr>`, else `unknown`
pub fn network_identifier(req: &HttpRequest) -> String {
    match extract_client_ip(req) {
        Some(ip) => format!("ip:{ip}"),
        None => crate::services::rate_limit::UNKNOWN_IDENTIFIER.to_string(),
    }
}

/// Every identifier a request is counted under
///
/// The network identifier always applies. The wallet header is not
/// authenticated, so it adds a `wallet:<address>` bucket on top of the
/// network one and never replaces it.
pub fn rate_limit_identifiers(req: &HttpRequest) -> Vec<String> {
    let mut identifiers = vec![network_identifier(req)];
    if let Some(wallet) = extract_wallet_address(req) {
        identifiers.push(format!("wallet:{wallet}"));
    }
    identifiers
}
