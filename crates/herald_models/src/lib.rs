//! Text generation providers and post extraction for Herald.
//!
//! The [`ContentGenerator`] turns a pillar and a post type into a
//! [`herald_core::GeneratedPost`]:
//!
//! 1. build one instruction prompt from sanitized inputs
//! 2. send it to a [`TextGenerator`] (OpenAI-compatible or Gemini)
//! 3. parse the reply with [`parse_generated_post`]
//!
//! # Example
//!
//! ```no_run
//! use herald_core::PostType;
//! use herald_models::{ChatCompletionsClient, ChatCompletionsConfig, ContentGenerator, FieldPolicy};
//! use std::sync::Arc;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ChatCompletionsConfig::new("https://api.openai.com", "gpt-4o-mini")
//!     .with_api_key("sk-...");
//! let generator = ContentGenerator::new(
//!     Arc::new(ChatCompletionsClient::new(config)),
//!     FieldPolicy::Lenient,
//! );
//! let post = generator.generate("Resilience", PostType::Tip).await?;
//! println!("{}", post.title);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod driver;
mod extraction;
mod gemini;
mod generator;
mod openai;

pub use driver::{GenerationSettings, TextGenerator};
pub use extraction::{extract_json_object, extract_marked_fields, strip_code_fences};
pub use gemini::{GEMINI_API_BASE, GeminiClient, GeminiConfig};
pub use generator::{
    ContentGenerator, FieldPolicy, PLACEHOLDER_CONTENT, PLACEHOLDER_TITLE, build_prompt,
    parse_generated_post,
};
pub use openai::{
    ChatCompletionRequest, ChatCompletionResponse, ChatCompletionsClient, ChatCompletionsConfig,
    Choice, ChoiceMessage, Message, Usage,
};
