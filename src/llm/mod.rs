//! LLM provider integration.
//!
//! Defines the chat-completions wire types shared by the agent loop and the
//! provider client, plus the `LlmClient` trait that lets tests substitute a
//! scripted fake for the real OpenAI backend.

mod client;
mod types;

pub use client::OpenAiClient;
pub use types::{ChatMessage, FunctionCall, FunctionDefinition, Role, ToolCall, ToolDefinition};

use async_trait::async_trait;

/// A chat-completions provider.
///
/// One call corresponds to one `ModelCall` transition of the agent loop: the
/// full accumulated message sequence goes out, one assistant message comes
/// back, possibly carrying tool-call requests.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[ToolDefinition]>,
    ) -> anyhow::Result<ChatMessage>;
}
