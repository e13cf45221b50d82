//! Log sanitization
//!
//! Response bodies are cut short and credential headers are masked before
//! anything reaches the log.

/// Bodies longer than this are truncated in log output.
const BODY_LOG_LIMIT: usize = 256;

/// Headers whose values never appear in logs.
const SECRET_HEADERS: [&str; 2] = ["authorization", "x-auth-key"];

/// Cut `body` at [`BODY_LOG_LIMIT`] bytes on a char boundary, noting the
/// full length.
pub fn truncate_for_log(body: &str) -> String {
    if body.len() <= BODY_LOG_LIMIT {
        return body.to_string();
    }
    let cut = (0..=BODY_LOG_LIMIT)
        .rev()
        .find(|&i| body.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}... [truncated, total {} bytes]", &body[..cut], body.len())
}

/// Render request headers as `name: value` pairs with credential values
/// replaced by `***`.
pub fn redact_headers(headers: &[(String, String)]) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            if SECRET_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
                format!("{name}: ***")
            } else {
                format!("{name}: {value}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
