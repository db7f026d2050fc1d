//! Analysis request assembly and reply formatting.

use gazette_core::{AnalysisOutput, BriefingRequest, GazetteError, MarketSweep, NewsDigest};

/// Separator between per-agent sections in the rendered analysis.
const SECTION_SEPARATOR_WIDTH: usize = 80;

/// Assemble the analysis request from the sweep and the enrichment outcome.
///
/// The task text states explicitly whether news context is included, so the
/// analysts' instructions always match the payload they actually receive.
/// Failed symbols ride along as explicit gaps (see the sweep's
/// serialization) instead of being silently dropped.
///
/// # Errors
/// Returns `MalformedPayload` only if the sweep or stories cannot be
/// serialized, which does not happen for string-keyed payloads.
pub fn assemble(
    sweep: &MarketSweep,
    digest: &NewsDigest,
) -> Result<BriefingRequest, GazetteError> {
    let market_json = to_pretty("market payload", sweep)?;

    let (headline_suffix, context_block, fundamental_angle) = match digest {
        NewsDigest::Stories(stories) => (
            " and news",
            format!("MARKET NEWS:\n{}", to_pretty("news payload", stories)?),
            "incorporating news catalysts",
        ),
        NewsDigest::Unavailable(notice) => (
            "",
            format!("NEWS STATUS: {notice}"),
            "based on price action and market structure",
        ),
    };

    let task = format!(
        "Analyze the following real market data{headline_suffix}:\n\n\
         MARKET DATA:\n{market_json}\n\n\
         {context_block}\n\n\
         Provide comprehensive analysis with:\n\
         1. Technical analysis with key levels and trends\n\
         2. Fundamental analysis {fundamental_angle}\n\
         3. Trading recommendations with entry/exit points\n\
         4. Risk assessment and position sizing\n\
         5. Key levels to watch for tomorrow's session"
    );

    Ok(BriefingRequest {
        task,
        includes_news: digest.is_available(),
    })
}

fn to_pretty<T: serde::Serialize>(what: &str, value: &T) -> Result<String, GazetteError> {
    serde_json::to_string_pretty(value).map_err(|e| GazetteError::malformed(what, e.to_string()))
}

/// Normalize either reply shape into one formatted text.
///
/// Per-agent contributions get a labeled markdown header and a full-width
/// `=` rule between sections; a single text block passes through verbatim.
#[must_use]
pub fn render_analysis(output: &AnalysisOutput) -> String {
    match output {
        AnalysisOutput::Text(text) => text.clone(),
        AnalysisOutput::PerAgent(sections) => {
            let rule = "=".repeat(SECTION_SEPARATOR_WIDTH);
            sections
                .iter()
                .map(|section| format!("## {}\n\n{}\n\n{rule}\n", section.role, section.content))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

#[cfg(test)]
mod tests {
    use gazette_core::AgentSection;

    use super::*;

    #[test]
    fn per_agent_sections_are_labeled_and_separated() {
        let output = AnalysisOutput::PerAgent(vec![
            AgentSection {
                role: "Technical Analyst".to_string(),
                content: "RSI neutral.".to_string(),
            },
            AgentSection {
                role: "Fundamental Analyst".to_string(),
                content: "Earnings strong.".to_string(),
            },
        ]);

        let text = render_analysis(&output);
        assert!(text.contains("## Technical Analyst"));
        assert!(text.contains("## Fundamental Analyst"));
        assert!(text.contains(&"=".repeat(80)));
    }

    #[test]
    fn single_text_blocks_pass_through() {
        let output = AnalysisOutput::Text("All quiet.".to_string());
        assert_eq!(render_analysis(&output), "All quiet.");
    }
}
