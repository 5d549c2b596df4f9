use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde_json::Value;

/// Tokens expiring within this many seconds are refreshed before use.
pub const REFRESH_THRESHOLD_SECS: i64 = 30;

/// Reads the `exp` claim (epoch seconds) from a compact three-part token.
/// The signature is not checked; the backend is the trust boundary.
pub fn decode_expiry(token: &str) -> Option<i64> {
    let mut parts = token.trim().split('.');
    let _header = parts.next().filter(|h| !h.is_empty())?;
    let payload = parts.next()?;
    parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    let claims: Value = serde_json::from_slice(&decoded).ok()?;
    let exp = claims.get("exp")?;
    exp.as_i64()
        .or_else(|| exp.as_f64().filter(|v| v.is_finite()).map(|v| v.floor() as i64))
}

pub fn seconds_until_expiry_at(token: &str, now: i64) -> Option<i64> {
    decode_expiry(token).and_then(|exp| exp.checked_sub(now))
}

/// Seconds left before `token` expires, `None` when absent or unreadable.
pub fn seconds_until_expiry(token: &str) -> Option<i64> {
    seconds_until_expiry_at(token, chrono::Utc::now().timestamp())
}

pub fn needs_refresh(seconds_left: Option<i64>) -> bool {
    matches!(seconds_left, Some(secs) if secs <= REFRESH_THRESHOLD_SECS)
}

#[cfg(test)]
pub(crate) fn token_with_exp(exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"u1","exp":{}}}"#, exp));
    format!("{}.{}.signature", header, payload)
}

#[cfg(test)]
pub(crate) fn token_expiring_in(secs: i64) -> String {
    token_with_exp(chrono::Utc::now().timestamp() + secs)
}
