//! News enrichment with total failure absorption.
//!
//! Whatever the news source does (time out, reject the credential, return
//! garbage), this step produces a [`NewsDigest`] value. The run never fails
//! here; an unavailable feed is a notice, not an error.

use gazette_core::{GazetteConfig, GazetteError, NewsDigest, NewsSource};
use tracing::{info, warn};

/// Fetch and bound news context, degrading to a notice on any failure.
///
/// `source` is `None` when no enrichment credential is configured; that is
/// the expected "optional feature disabled" path, not an error.
pub async fn digest(source: Option<&dyn NewsSource>, config: &GazetteConfig) -> NewsDigest {
    let Some(source) = source else {
        info!("news credential not configured, continuing without enrichment");
        return NewsDigest::Unavailable(
            "market news unavailable: FMP_API_KEY is not configured".to_string(),
        );
    };

    match source.latest(&config.news_symbols, config.news_limit).await {
        Ok(stories) if stories.is_empty() => {
            warn!("news source returned no articles");
            NewsDigest::Unavailable(
                "market news unavailable: no articles returned, possibly rate-limited".to_string(),
            )
        }
        Ok(mut stories) => {
            stories.truncate(config.news_limit);
            for story in &mut stories {
                story.excerpt = bound_excerpt(&story.excerpt, config.excerpt_limit);
            }
            info!(count = stories.len(), "news fetched");
            NewsDigest::Stories(stories)
        }
        Err(e) => {
            warn!(error = %e, "news fetch failed, continuing without enrichment");
            NewsDigest::Unavailable(notice_for(&e))
        }
    }
}

/// Map a news-source failure to an actionable degradation notice.
fn notice_for(error: &GazetteError) -> String {
    match error {
        GazetteError::Status { status: 401, .. } => {
            "market news unavailable: invalid API key, check FMP_API_KEY".to_string()
        }
        GazetteError::Status {
            status: 403 | 429, ..
        } => "market news unavailable: access forbidden or rate-limited, \
              check the FMP plan limits"
            .to_string(),
        GazetteError::Status { status, .. } if *status >= 500 => {
            "market news unavailable: provider-side error, try again later".to_string()
        }
        GazetteError::Status { status, .. } => {
            format!("market news unavailable: unexpected status {status}")
        }
        GazetteError::Timeout { .. } => {
            "market news unavailable: request exceeded the time budget".to_string()
        }
        GazetteError::MalformedPayload { .. } => {
            "market news unavailable: unexpected response format".to_string()
        }
        other => format!("market news unavailable: {other}"),
    }
}

/// Truncate to at most `limit` characters, appending a continuation marker
/// when anything was cut. Operates on char boundaries.
fn bound_excerpt(text: &str, limit: usize) -> String {
    let mut chars = text.char_indices();
    match chars.nth(limit) {
        None => text.to_string(),
        Some((byte_idx, _)) => {
            let mut bounded = text[..byte_idx].to_string();
            bounded.push_str("...");
            bounded
        }
    }
}
