//! gazette-swarm
//!
//! Client for the Swarms multi-agent completions API. One call submits the
//! assembled briefing task together with the fixed two-analyst roster and
//! returns the produced output in either of the service's two shapes (one
//! combined text block, or ordered per-agent contributions) plus the billed
//! cost when the service reports one.
#![warn(missing_docs)]

use std::time::Duration;

use async_trait::async_trait;
use gazette_core::{
    AgentSection, AnalysisBackend, AnalysisOutput, AnalysisReply, BriefingRequest, GazetteError,
    send_with_deadline,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://swarms-api-285321057562.us-east1.run.app";

/// Deadline for one completions call; the service fans out to multiple
/// model calls internally, so this is far above the connector deadlines.
const DEFAULT_DEADLINE: Duration = Duration::from_secs(90);

const TECHNICAL_PROMPT: &str = "You are a professional technical analyst. Analyze the provided real market data:
- Calculate key technical indicators (RSI, MACD, Moving Averages)
- Identify support and resistance levels
- Determine market trends and momentum
- Provide trading signals and price targets
Format your analysis professionally with specific price levels.";

const FUNDAMENTAL_PROMPT: &str = "You are a fundamental market analyst. Using the provided market data and any available news:
- Analyze company fundamentals and market conditions
- Evaluate economic indicators and market sentiment
- Assess sector rotation and value opportunities
- Identify risks and catalysts
- If news data is unavailable, focus on technical patterns and historical data
Provide investment recommendations with risk assessment.";

/// Completions-API client.
#[derive(Clone)]
pub struct SwarmClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    deadline: Duration,
}

#[derive(Serialize)]
struct CompletionsBody<'a> {
    name: &'a str,
    description: &'a str,
    agents: [AgentSpec<'a>; 2],
    swarm_type: &'a str,
    task: &'a str,
    max_loops: u32,
}

#[derive(Serialize)]
struct AgentSpec<'a> {
    agent_name: &'a str,
    system_prompt: &'a str,
    model_name: &'a str,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Deserialize)]
struct CompletionsReply {
    #[serde(default)]
    output: Option<WireOutput>,
    #[serde(default)]
    usage: Option<BillingEnvelope>,
    #[serde(default)]
    metadata: Option<BillingEnvelope>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireOutput {
    Text(String),
    Agents(Vec<WireAgent>),
}

/// Agent contributions arrive under varying key pairs depending on the
/// service version; both are accepted.
#[derive(Deserialize)]
struct WireAgent {
    #[serde(default)]
    role: Option<String>,
    #[serde(default)]
    agent_name: Option<String>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    response: Option<String>,
}

#[derive(Deserialize)]
struct BillingEnvelope {
    #[serde(default)]
    billing_info: Option<BillingInfo>,
}

#[derive(Deserialize)]
struct BillingInfo {
    #[serde(default)]
    total_cost: Option<f64>,
}

impl SwarmClient {
    /// Build a client for the given API key with the default deadline.
    #[must_use]
    pub fn new(http: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            deadline: DEFAULT_DEADLINE,
        }
    }

    /// Point the client at a different base URL (tests, proxies).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }

    /// Override the per-call deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl AnalysisBackend for SwarmClient {
    async fn complete(&self, request: &BriefingRequest) -> Result<AnalysisReply, GazetteError> {
        let body = CompletionsBody {
            name: "Real-Time Stock Analysis",
            description: "Live market data analysis with AI agents",
            agents: [
                AgentSpec {
                    agent_name: "Technical Analyst",
                    system_prompt: TECHNICAL_PROMPT,
                    model_name: "gpt-4o-mini",
                    max_tokens: 1500,
                    temperature: 0.2,
                },
                AgentSpec {
                    agent_name: "Fundamental Analyst",
                    system_prompt: FUNDAMENTAL_PROMPT,
                    model_name: "gpt-4o-mini",
                    max_tokens: 1500,
                    temperature: 0.3,
                },
            ],
            swarm_type: "ConcurrentWorkflow",
            task: &request.task,
            max_loops: 1,
        };

        debug!(includes_news = request.includes_news, "dispatching analysis");
        let response = send_with_deadline(
            "swarm completions",
            self.http
                .post(format!("{}/v1/swarm/completions", self.base_url))
                .header("x-api-key", &self.api_key)
                .json(&body),
            self.deadline,
        )
        .await?;

        let reply = response
            .json::<CompletionsReply>()
            .await
            .map_err(|e| GazetteError::malformed("swarm completions", e.to_string()))?;

        let output = match reply.output {
            Some(WireOutput::Text(text)) => AnalysisOutput::Text(text),
            Some(WireOutput::Agents(agents)) => {
                AnalysisOutput::PerAgent(agents.into_iter().map(section).collect())
            }
            None => {
                return Err(GazetteError::malformed(
                    "swarm completions",
                    "no analysis output in response",
                ));
            }
        };

        let cost = total_cost(reply.usage).or_else(|| total_cost(reply.metadata));
        Ok(AnalysisReply { output, cost })
    }
}

fn section(agent: WireAgent) -> AgentSection {
    AgentSection {
        role: agent
            .role
            .or(agent.agent_name)
            .unwrap_or_else(|| "AI Agent".to_string()),
        content: agent.content.or(agent.response).unwrap_or_default(),
    }
}

fn total_cost(envelope: Option<BillingEnvelope>) -> Option<f64> {
    envelope?.billing_info?.total_cost
}
