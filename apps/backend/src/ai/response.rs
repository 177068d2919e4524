//! Parsing of reviewer replies into a [`ReviewOutcome`].

use lazy_regex::regex_captures;
use serde::Deserialize;
use tracing::debug;

use crate::ai::trait_def::{AiError, ReviewOutcome};
use crate::domain::{EffectVector, PolicyDraft};
use crate::logging::pii::Redacted;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Verdict {
    approved: bool,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    news_flash: String,
    #[serde(default)]
    effects: EffectVector,
    #[serde(default)]
    reason: String,
}

/// The JSON object inside a reply: a fenced code block if there is one,
/// else the outermost `{ ... }` span, else the trimmed text.
pub fn extract_json(content: &str) -> &str {
    if let Some((_, body)) = regex_captures!(r"(?s)```(?:json)?\s*(.+?)```", content) {
        return body.trim();
    }
    match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if end > start => &content[start..=end],
        _ => content.trim(),
    }
}

pub fn parse_verdict(content: &str) -> Result<ReviewOutcome, AiError> {
    let json = extract_json(content);
    let verdict: Verdict = serde_json::from_str(json).map_err(|e| {
        debug!(content = %Redacted(json), error = %e, "Unparseable reviewer reply");
        AiError::Malformed(e.to_string())
    })?;

    if !verdict.approved {
        return Ok(ReviewOutcome::Rejected {
            reason: verdict.reason,
        });
    }

    if verdict.title.trim().is_empty() {
        return Err(AiError::Malformed("approved policy has no title".into()));
    }

    Ok(ReviewOutcome::Approved(PolicyDraft {
        title: verdict.title,
        description: verdict.description,
        news_flash: verdict.news_flash,
        effects: verdict.effects,
    }))
}
