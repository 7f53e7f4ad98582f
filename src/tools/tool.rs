//! The closed set of tools the persona can call.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::llm::ToolDefinition;

/// Every tool the model is offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Visitor left contact details.
    RecordUserDetails,
    /// The persona couldn't answer a question.
    RecordUnknownQuestion,
}

impl ToolKind {
    pub const ALL: [ToolKind; 2] = [ToolKind::RecordUserDetails, ToolKind::RecordUnknownQuestion];

    pub fn name(self) -> &'static str {
        match self {
            ToolKind::RecordUserDetails => "record_user_details",
            ToolKind::RecordUnknownQuestion => "record_unknown_question",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ToolKind::RecordUserDetails => {
                "Use this tool to record that a user is interested in being in touch \
                 and provided an email address"
            }
            ToolKind::RecordUnknownQuestion => {
                "Always use this tool to record any question that couldn't be answered \
                 as you didn't know the answer"
            }
        }
    }

    pub fn parameters_schema(self) -> serde_json::Value {
        match self {
            ToolKind::RecordUserDetails => serde_json::json!({
                "type": "object",
                "properties": {
                    "email": {
                        "type": "string",
                        "description": "The email address of this user"
                    },
                    "name": {
                        "type": "string",
                        "description": "The user's name, if they provided it"
                    },
                    "notes": {
                        "type": "string",
                        "description": "Any additional information about the conversation that's worth recording to give context"
                    }
                },
                "required": ["email"],
                "additionalProperties": false
            }),
            ToolKind::RecordUnknownQuestion => serde_json::json!({
                "type": "object",
                "properties": {
                    "question": {
                        "type": "string",
                        "description": "The question that couldn't be answered"
                    }
                },
                "required": ["question"],
                "additionalProperties": false
            }),
        }
    }

    pub fn definition(self) -> ToolDefinition {
        ToolDefinition {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters_schema(),
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolKind {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ToolKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ToolError::NotFound {
                name: s.to_string(),
            })
    }
}

/// Arguments for `record_user_details`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserDetails {
    pub email: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_notes")]
    pub notes: String,
}

fn default_name() -> String {
    "Name not provided".to_string()
}

fn default_notes() -> String {
    "not provided".to_string()
}

impl UserDetails {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            name: default_name(),
            notes: default_notes(),
        }
    }
}

/// Arguments for `record_unknown_question`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnknownQuestion {
    pub question: String,
}

/// A tool call with its arguments parsed and checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    RecordUserDetails(UserDetails),
    RecordUnknownQuestion(UnknownQuestion),
}

impl ToolInvocation {
    /// Resolve a tool name and its JSON-encoded arguments.
    pub fn parse(name: &str, arguments: &str) -> Result<Self, ToolError> {
        let kind: ToolKind = name.parse()?;
        // Some models send "" for a call with no arguments.
        let arguments = if arguments.trim().is_empty() {
            "{}"
        } else {
            arguments
        };

        let invalid = |reason: String| ToolError::InvalidParameters {
            name: kind.name().to_string(),
            reason,
        };

        match kind {
            ToolKind::RecordUserDetails => {
                let details: UserDetails =
                    serde_json::from_str(arguments).map_err(|e| invalid(e.to_string()))?;
                if details.email.trim().is_empty() {
                    return Err(invalid("email must not be empty".to_string()));
                }
                Ok(Self::RecordUserDetails(details))
            }
            ToolKind::RecordUnknownQuestion => {
                let question: UnknownQuestion =
                    serde_json::from_str(arguments).map_err(|e| invalid(e.to_string()))?;
                if question.question.trim().is_empty() {
                    return Err(invalid("question must not be empty".to_string()));
                }
                Ok(Self::RecordUnknownQuestion(question))
            }
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            Self::RecordUserDetails(_) => ToolKind::RecordUserDetails,
            Self::RecordUnknownQuestion(_) => ToolKind::RecordUnknownQuestion,
        }
    }
}

/// Acknowledgement returned by every recording tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolOutput {
    pub recorded: String,
}

impl ToolOutput {
    pub fn ok() -> Self {
        Self {
            recorded: "ok".to_string(),
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::json!({ "recorded": self.recorded }).to_string()
    }
}
