//! Petition review: the reviewer trait, an HTTP chat-completions backend,
//! and a scripted backend for tests and offline play.

mod chat_reviewer;
pub mod prompt;
pub mod response;
mod scripted;
mod trait_def;

pub use chat_reviewer::ChatCompletionsReviewer;
pub use scripted::ScriptedReviewer;
pub use trait_def::{AiError, PetitionContext, PetitionReviewer, ReviewOutcome, UnavailableReviewer};
