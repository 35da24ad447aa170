//! Time-based one-time passwords (RFC 6238) over HMAC-SHA256.

use crate::config::TotpConfig;
use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TotpError {
    #[error("Secret must be hex encoded")]
    InvalidSecretEncoding,

    #[error("Secret must be at least {min} bytes")]
    SecretTooShort { min: usize },

    #[error("Invalid secret key")]
    InvalidKey,
}

/// Shortest accepted shared secret (RFC 4226 recommends 160 bits)
pub const MIN_SECRET_BYTES: usize = 16;

/// Decode a hex-encoded shared secret
pub fn decode_secret(secret_hex: &str) -> Result<Vec<u8>, TotpError> {
    let secret = hex::decode(secret_hex.trim()).map_err(|_| TotpError::InvalidSecretEncoding)?;
    if secret.len() < MIN_SECRET_BYTES {
        return Err(TotpError::SecretTooShort {
            min: MIN_SECRET_BYTES,
        });
    }
    Ok(secret)
}

/// HOTP value for a moving-factor `counter`
fn hotp(secret: &[u8], counter: u64, digits: u32) -> Result<String, TotpError> {
    let mut mac = HmacSha256::new_from_slice(secret).map_err(|_| TotpError::InvalidKey)?;
    mac.update(&counter.to_be_bytes());
    let hash = mac.finalize().into_bytes();

    // Dynamic truncation
    let offset = usize::from(hash[hash.len() - 1] & 0x0f);
    let binary = (u32::from(hash[offset] & 0x7f) << 24)
        | (u32::from(hash[offset + 1]) << 16)
        | (u32::from(hash[offset + 2]) << 8)
        | u32::from(hash[offset + 3]);

    let code = binary % 10u32.pow(digits);
    Ok(format!("{code:0width$}", width = digits as usize))
}

/// Code for the step containing `unix_time`
pub fn generate_code(secret: &[u8], unix_time: u64, config: &TotpConfig) -> Result<String, TotpError> {
    hotp(secret, unix_time / config.step_seconds, config.digits)
}

/// Check `code` against the current step and `config.skew` steps either side
pub fn verify_code(
    secret: &[u8],
    code: &str,
    unix_time: u64,
    config: &TotpConfig,
) -> Result<bool, TotpError> {
    let code = code.trim();
    if code.len() != config.digits as usize || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(false);
    }

    let current = unix_time / config.step_seconds;
    let first = current.saturating_sub(config.skew);
    let last = current.saturating_add(config.skew);

    let mut matched = false;
    for counter in first..=last {
        let expected = hotp(secret, counter, config.digits)?;
        // Evaluate every step so timing does not reveal which one matched
        matched |= constant_time_eq(expected.as_bytes(), code.as_bytes());
    }
    Ok(matched)
}
