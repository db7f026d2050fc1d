//! Single-attempt HTTP calls with a hard deadline.

use std::time::Duration;

use crate::GazetteError;

/// Maximum number of body bytes kept on a non-success status, for diagnostics.
const DIAGNOSTIC_BODY_LIMIT: usize = 2048;

/// Issue a request with a hard deadline and normalize the failure modes.
///
/// Behavior:
/// - A single attempt; retry policy, if any, belongs to the caller.
/// - If no response arrives before `deadline`, the in-flight call is dropped
///   (cancelling it) and the result is [`GazetteError::Timeout`].
/// - Connection-level failures become [`GazetteError::Transport`].
/// - Non-2xx statuses become [`GazetteError::Status`], carrying the status
///   code and a truncated body for diagnostics.
///
/// # Errors
/// See above; the `Ok` value is the raw successful response, left undrained
/// so callers can decode it as they see fit.
pub async fn send_with_deadline(
    what: &str,
    request: reqwest::RequestBuilder,
    deadline: Duration,
) -> Result<reqwest::Response, GazetteError> {
    let response = match tokio::time::timeout(deadline, request.send()).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => return Err(GazetteError::transport(what, e.to_string())),
        Err(_) => return Err(GazetteError::timeout(what)),
    };

    let status = response.status();
    if !status.is_success() {
        let mut body = response.text().await.unwrap_or_default();
        body.truncate(floor_char_boundary(&body, DIAGNOSTIC_BODY_LIMIT));
        return Err(GazetteError::status(status.as_u16(), body));
    }

    Ok(response)
}

/// Largest index `<= at` that lands on a char boundary of `s`.
fn floor_char_boundary(s: &str, at: usize) -> usize {
    if at >= s.len() {
        return s.len();
    }
    let mut idx = at;
    while !s.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

#[cfg(test)]
mod tests {
    use super::floor_char_boundary;

    #[test]
    fn boundary_respects_multibyte_chars() {
        let s = "€€€"; // 3 bytes each
        assert_eq!(floor_char_boundary(s, 4), 3);
        assert_eq!(floor_char_boundary(s, 3), 3);
        assert_eq!(floor_char_boundary(s, 100), s.len());
    }
}
