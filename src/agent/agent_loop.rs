//! Core agent loop implementation.

use std::sync::Arc;

use thiserror::Error;

use crate::llm::{ChatMessage, LlmClient, Role, ToolCall};
use crate::tools::{ToolError, ToolRegistry};

use super::prompt::build_system_prompt;

#[derive(Debug, Error)]
pub enum AgentError {
    /// The outbound LLM call failed; not retried, the request aborts.
    #[error("LLM provider request failed: {0}")]
    Provider(anyhow::Error),

    /// The model produced a tool call the tool layer rejected.
    #[error(transparent)]
    Tool(#[from] ToolError),

    /// The model answered with neither content nor tool calls.
    #[error("LLM returned an empty response")]
    EmptyResponse,

    /// The model kept requesting tools past the round cap; fail closed.
    #[error("agent did not produce a final answer within {0} rounds")]
    RoundLimit(usize),
}

/// The report-generating agent.
///
/// Holds an injected LLM client so tests can substitute a scripted fake.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_rounds: usize,
}

impl Agent {
    /// Create a new agent around the given LLM client.
    pub fn new(llm: Arc<dyn LlmClient>, model: String, max_rounds: usize) -> Self {
        Self {
            llm,
            tools: ToolRegistry::new(),
            model,
            max_rounds,
        }
    }

    /// Run the loop for one user message and return the final report text.
    ///
    /// Conversation state lives only for the duration of this call; nothing
    /// is retained between requests.
    pub async fn run(&self, user_message: &str) -> Result<String, AgentError> {
        let mut messages = vec![
            ChatMessage::text(Role::System, build_system_prompt()),
            ChatMessage::text(Role::User, user_message),
        ];

        let tool_schemas = self.tools.get_tool_schemas();

        for round in 0..self.max_rounds {
            tracing::debug!("Agent round {}", round + 1);

            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(&tool_schemas))
                .await
                .map_err(AgentError::Provider)?;

            // Check for tool calls
            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    let calls = tool_calls.clone();

                    // Record the assistant turn that requested the calls
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content.clone(),
                        tool_calls: Some(calls.clone()),
                        tool_call_id: None,
                    });

                    // Execute in request order; one result message per call,
                    // appended in that same order before the next model call
                    for tool_call in &calls {
                        tracing::debug!(
                            "Executing tool {} with args {}",
                            tool_call.function.name,
                            tool_call.function.arguments
                        );

                        let result = self.execute_tool_call(tool_call).await?;
                        messages.push(ChatMessage::tool_result(tool_call.id.clone(), result));
                    }

                    continue;
                }
            }

            // No tool calls - this is the final report
            if let Some(content) = response.content {
                return Ok(content);
            }

            return Err(AgentError::EmptyResponse);
        }

        Err(AgentError::RoundLimit(self.max_rounds))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> Result<String, AgentError> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .map_err(|e| ToolError::InvalidArguments {
                tool: tool_call.function.name.clone(),
                reason: format!("arguments are not valid JSON: {}", e),
            })?;

        Ok(self.tools.execute(&tool_call.function.name, args).await?)
    }
}
