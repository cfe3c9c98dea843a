//! OpenAI-compatible chat completions provider.

mod client;
mod request;
mod response;

pub use client::{ChatCompletionsClient, ChatCompletionsConfig};
pub use request::{ChatCompletionRequest, Message};
pub use response::{ChatCompletionResponse, Choice, ChoiceMessage, Usage};
