use gazette_core::{GazetteConfig, GazetteError, NewsDigest, NewsSource, NewsStory};
use gazette::enrich;

fn story(title: &str, excerpt: &str) -> NewsStory {
    NewsStory {
        title: title.to_string(),
        excerpt: excerpt.to_string(),
        published: "2025-06-02 13:00:00".to_string(),
        symbol: "AAPL".to_string(),
        url: "https://example.org/a".to_string(),
    }
}

fn notice(digest: &NewsDigest) -> &str {
    match digest {
        NewsDigest::Unavailable(notice) => notice,
        NewsDigest::Stories(_) => panic!("expected a degradation notice"),
    }
}

#[tokio::test]
async fn no_source_is_the_expected_disabled_path() {
    let digest = enrich::digest(None, &GazetteConfig::default()).await;
    assert!(notice(&digest).contains("FMP_API_KEY"));
}

#[tokio::test]
async fn every_failure_mode_degrades_to_a_notice() {
    let cases: Vec<(GazetteError, &str)> = vec![
        (GazetteError::status(401, String::new()), "invalid API key"),
        (GazetteError::status(403, String::new()), "forbidden"),
        (GazetteError::status(429, String::new()), "rate-limited"),
        (GazetteError::status(500, String::new()), "try again later"),
        (GazetteError::status(503, String::new()), "try again later"),
        (GazetteError::timeout("stock news"), "time budget"),
        (
            GazetteError::malformed("stock news", "expected array"),
            "unexpected response format",
        ),
        (
            GazetteError::transport("stock news", "dns failure"),
            "market news unavailable",
        ),
    ];

    for (error, expected) in cases {
        let failing = <dyn NewsSource>::from_fn(move |_, _| Err(error.clone()));
        let digest = enrich::digest(Some(failing.as_ref()), &GazetteConfig::default()).await;
        assert!(
            notice(&digest).contains(expected),
            "{expected:?} not in {digest:?}"
        );
    }
}

#[tokio::test]
async fn empty_result_set_is_a_notice_not_a_success() {
    let empty = <dyn NewsSource>::from_fn(|_, _| Ok(vec![]));
    let digest = enrich::digest(Some(empty.as_ref()), &GazetteConfig::default()).await;
    assert!(notice(&digest).contains("no articles returned"));
}

#[tokio::test]
async fn stories_are_capped_and_excerpts_bounded() {
    let many = <dyn NewsSource>::from_fn(|_, _| {
        Ok((0..9)
            .map(|i| story(&format!("story {i}"), &"x".repeat(400)))
            .collect())
    });

    let config = GazetteConfig::default();
    let digest = enrich::digest(Some(many.as_ref()), &config).await;
    match digest {
        NewsDigest::Stories(stories) => {
            assert_eq!(stories.len(), config.news_limit);
            for s in &stories {
                assert_eq!(s.excerpt.chars().count(), config.excerpt_limit + 3);
                assert!(s.excerpt.ends_with("..."));
            }
        }
        NewsDigest::Unavailable(n) => panic!("expected stories, got notice {n:?}"),
    }
}
