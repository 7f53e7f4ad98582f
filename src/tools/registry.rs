//! Tool registry: schemas for the model, dispatch for the agent.

use crate::error::ToolError;
use crate::llm::ToolDefinition;
use crate::notify::Notifier;
use crate::tools::tool::{ToolInvocation, ToolKind, ToolOutput, UnknownQuestion, UserDetails};

/// Registry of the persona's tools. Immutable after construction.
pub struct ToolRegistry {
    notifier: Notifier,
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    pub fn new(notifier: Notifier) -> Self {
        Self {
            notifier,
            definitions: ToolKind::ALL.into_iter().map(ToolKind::definition).collect(),
        }
    }

    /// Tool definitions for LLM function calling.
    pub fn tool_definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    /// Number of registered tools.
    pub fn count(&self) -> usize {
        self.definitions.len()
    }

    /// Parse and run one tool call from the model.
    pub fn execute(&self, name: &str, arguments: &str) -> Result<ToolOutput, ToolError> {
        let invocation = ToolInvocation::parse(name, arguments)?;
        tracing::info!(tool = %invocation.kind(), "Tool called");
        Ok(match invocation {
            ToolInvocation::RecordUserDetails(details) => self.record_user_details(details),
            ToolInvocation::RecordUnknownQuestion(question) => {
                self.record_unknown_question(question)
            }
        })
    }

    /// Push the visitor's contact details. Always acknowledges.
    pub fn record_user_details(&self, details: UserDetails) -> ToolOutput {
        self.notifier.notify(format!(
            "Recording {} with email {} and notes {}",
            details.name, details.email, details.notes
        ));
        ToolOutput::ok()
    }

    /// Push a question the persona couldn't answer. Always acknowledges.
    pub fn record_unknown_question(&self, question: UnknownQuestion) -> ToolOutput {
        self.notifier
            .notify(format!("Recording {}", question.question));
        ToolOutput::ok()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::notify::testing::{FailingSink, RecordingSink};

    fn registry_with(sink: Arc<RecordingSink>) -> ToolRegistry {
        ToolRegistry::new(Notifier::new(sink))
    }

    #[tokio::test]
    async fn test_definitions_cover_both_tools() {
        let registry = registry_with(Arc::new(RecordingSink::default()));
        assert_eq!(registry.count(), 2);

        let names: Vec<&str> = registry
            .tool_definitions()
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["record_user_details", "record_unknown_question"]);
    }

    #[tokio::test]
    async fn test_record_user_details_notifies_with_defaults() {
        let sink = Arc::new(RecordingSink::default());
        let registry = registry_with(sink.clone());

        let output = registry.record_user_details(UserDetails::new("a@example.com"));
        assert_eq!(output, ToolOutput::ok());

        let sent = sink.wait_for(1).await;
        assert_eq!(
            sent,
            vec!["Recording Name not provided with email a@example.com and notes not provided"]
        );
    }

    #[tokio::test]
    async fn test_record_user_details_ok_when_notification_fails() {
        let registry = ToolRegistry::new(Notifier::new(Arc::new(FailingSink {
            delay: Duration::ZERO,
        })));

        let output = registry
            .execute("record_user_details", r#"{"email":"a@example.com"}"#)
            .unwrap();
        assert_eq!(output.recorded, "ok");

        // Let the failing delivery run; nothing should propagate.
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn test_record_unknown_question() {
        let sink = Arc::new(RecordingSink::default());
        let registry = registry_with(sink.clone());

        let output = registry
            .execute(
                "record_unknown_question",
                r#"{"question":"What is your favorite color?"}"#,
            )
            .unwrap();
        assert_eq!(output, ToolOutput::ok());

        let sent = sink.wait_for(1).await;
        assert_eq!(sent, vec!["Recording What is your favorite color?"]);
    }

    #[tokio::test]
    async fn test_unknown_tool_is_rejected_without_notifying() {
        let sink = Arc::new(RecordingSink::default());
        let registry = registry_with(sink.clone());

        let err = registry.execute("send_money", "{}").unwrap_err();
        assert!(matches!(err, ToolError::NotFound { .. }));

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(sink.sent().is_empty());
    }
}
