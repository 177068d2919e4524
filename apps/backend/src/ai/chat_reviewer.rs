//! Reviewer backed by an OpenAI-compatible `/chat/completions` endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::prompt::build_prompt;
use crate::ai::response::parse_verdict;
use crate::ai::trait_def::{AiError, PetitionContext, PetitionReviewer, ReviewOutcome};
use crate::config::ai::ReviewerConfig;
use crate::logging::pii::Redacted;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1000;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: String,
}

pub struct ChatCompletionsReviewer {
    client: reqwest::Client,
    config: ReviewerConfig,
}

impl ChatCompletionsReviewer {
    pub fn new(config: ReviewerConfig) -> Result<Self, AiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::Transport(e.to_string()))?;
        Ok(Self { client, config })
    }
}

fn transport_error(e: reqwest::Error) -> AiError {
    if e.is_timeout() {
        AiError::Timeout
    } else {
        AiError::Transport(e.to_string())
    }
}

#[async_trait]
impl PetitionReviewer for ChatCompletionsReviewer {
    async fn review(&self, ctx: &PetitionContext) -> Result<ReviewOutcome, AiError> {
        let prompt = build_prompt(ctx);
        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "system",
                content: &prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        debug!(model = %self.config.model, passed = ctx.passed.len(), "Requesting petition review");

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %Redacted(&text), "Petition reviewer returned an error status");
            return Err(AiError::Transport(format!("reviewer returned HTTP {status}")));
        }

        let reply: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout
            } else {
                AiError::Malformed(e.to_string())
            }
        })?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::Malformed("reply has no choices".into()))?;

        parse_verdict(&content)
    }
}
