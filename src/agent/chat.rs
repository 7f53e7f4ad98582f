//! Persona chat loop: model → tools → model until a final answer.

use std::sync::Arc;

use crate::agent::prompt::system_prompt;
use crate::config::ChatConfig;
use crate::error::ChatError;
use crate::llm::{ChatMessage, FinishReason, LlmProvider, Role, ToolCall, ToolCompletionRequest};
use crate::profile::Profile;
use crate::tools::ToolRegistry;

/// Returned to the visitor whenever a turn fails, whatever the cause.
pub const APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

/// Shared, read-only dependencies of the agent.
pub struct AgentDeps {
    pub llm: Arc<dyn LlmProvider>,
    pub tools: Arc<ToolRegistry>,
    pub profile: Arc<Profile>,
}

/// Where a turn is in the model/tool cycle.
#[derive(Debug)]
enum LoopState {
    AwaitingModel,
    ExecutingTools {
        content: Option<String>,
        tool_calls: Vec<ToolCall>,
    },
    Done(String),
}

/// Answers visitor messages as the persona.
///
/// Holds no per-request state; one instance serves all concurrent requests.
pub struct ChatAgent {
    deps: AgentDeps,
    config: ChatConfig,
}

impl ChatAgent {
    pub fn new(deps: AgentDeps, config: ChatConfig) -> Self {
        Self { deps, config }
    }

    /// Answer `message`, never failing. Errors are logged and replaced by [`APOLOGY`].
    pub async fn chat(&self, message: &str, history: &[ChatMessage]) -> String {
        match self.respond(message, history).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!(error = %e, "Error in chat");
                APOLOGY.to_string()
            }
        }
    }

    /// Answer `message`, surfacing the typed failure.
    pub async fn respond(&self, message: &str, history: &[ChatMessage]) -> Result<String, ChatError> {
        let messages = self.build_conversation(message, history);
        let timeout = self.config.request_timeout;
        tokio::time::timeout(timeout, self.run_loop(messages))
            .await
            .map_err(|_| ChatError::Timeout { timeout })?
    }

    /// `[system, ...recent history, user]`.
    fn build_conversation(&self, message: &str, history: &[ChatMessage]) -> Vec<ChatMessage> {
        let window = window_history(history, self.config.history_window);
        let mut messages = Vec::with_capacity(window.len() + 2);
        messages.push(ChatMessage::system(system_prompt(&self.deps.profile)));
        messages.extend(window);
        messages.push(ChatMessage::user(message));
        messages
    }

    async fn run_loop(&self, mut messages: Vec<ChatMessage>) -> Result<String, ChatError> {
        let mut state = LoopState::AwaitingModel;
        let mut rounds = 0;

        loop {
            state = match state {
                LoopState::AwaitingModel => {
                    let request = ToolCompletionRequest::new(
                        messages.clone(),
                        self.deps.tools.tool_definitions().to_vec(),
                    );
                    let response = self.deps.llm.complete_with_tools(request).await?;
                    tracing::debug!(
                        finish_reason = ?response.finish_reason,
                        tool_calls = response.tool_calls.len(),
                        input_tokens = response.input_tokens,
                        output_tokens = response.output_tokens,
                        "Model responded"
                    );

                    // A tool-use turn without calls has nothing to run; treat it as final.
                    if response.finish_reason == FinishReason::ToolUse
                        && !response.tool_calls.is_empty()
                    {
                        LoopState::ExecutingTools {
                            content: response.content,
                            tool_calls: response.tool_calls,
                        }
                    } else {
                        LoopState::Done(response.content.unwrap_or_default())
                    }
                }
                LoopState::ExecutingTools {
                    content,
                    tool_calls,
                } => {
                    if rounds == self.config.max_tool_rounds {
                        return Err(ChatError::ToolLoopExceeded {
                            max_rounds: self.config.max_tool_rounds,
                        });
                    }
                    rounds += 1;

                    // Results must follow the assistant turn that requested them.
                    let results: Vec<ChatMessage> =
                        tool_calls.iter().map(|call| self.run_tool_call(call)).collect();
                    messages.push(ChatMessage::assistant_with_tool_calls(content, tool_calls));
                    messages.extend(results);
                    LoopState::AwaitingModel
                }
                LoopState::Done(reply) => return Ok(reply),
            };
        }
    }

    /// Execute one call and wrap its JSON result as a tool message.
    fn run_tool_call(&self, call: &ToolCall) -> ChatMessage {
        let content = match self.deps.tools.execute(&call.name, &call.arguments) {
            Ok(output) => output.to_json(),
            Err(e) => {
                tracing::warn!(tool = %call.name, call_id = %call.id, error = %e, "Tool call rejected");
                serde_json::json!({ "error": e.to_string() }).to_string()
            }
        };
        ChatMessage::tool_result(&call.id, content)
    }
}

/// Keep the user/assistant entries among the last `window` entries of
/// client-supplied history.
///
/// The window is taken over the raw history first, so nothing older than the
/// `window` most recent entries reaches the provider. System and tool entries
/// inside the window are then dropped: the fresh system prompt must stay
/// unique, and a tool result is only valid right after its assistant call.
pub fn window_history(history: &[ChatMessage], window: usize) -> Vec<ChatMessage> {
    let recent = &history[history.len().saturating_sub(window)..];
    let kept: Vec<ChatMessage> = recent
        .iter()
        .filter_map(|msg| match msg.role {
            Role::User => Some(ChatMessage::user(&msg.content)),
            Role::Assistant => Some(ChatMessage::assistant(&msg.content)),
            Role::System | Role::Tool => None,
        })
        .collect();

    if kept.len() < recent.len() {
        tracing::debug!(
            dropped = recent.len() - kept.len(),
            "Dropped system/tool entries from client history"
        );
    }

    kept
}
