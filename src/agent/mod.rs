//! Agent module - the tool-calling report generator.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Seed the conversation with the astrologer system prompt and user data
//! 2. Call the LLM with the declared tools
//! 3. If the model requests tool calls, execute them in order and feed the
//!    results back
//! 4. Repeat until the model answers without tool calls or the round cap
//!    is reached

mod agent_loop;
mod prompt;

pub use agent_loop::{Agent, AgentError};
pub use prompt::build_system_prompt;
