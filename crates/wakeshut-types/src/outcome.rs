//! Result of a single remote command invocation

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExecutionOutcome {
    Success { output: String },
    Failure { message: String },
}

impl ExecutionOutcome {
    pub fn success(output: impl Into<String>) -> Self {
        Self::Success {
            output: output.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Output on success, message on failure
    pub fn text(&self) -> &str {
        match self {
            Self::Success { output } => output,
            Self::Failure { message } => message,
        }
    }
}

impl<E: std::fmt::Display> From<Result<String, E>> for ExecutionOutcome {
    fn from(result: Result<String, E>) -> Self {
        match result {
            Ok(output) => Self::Success { output },
            Err(e) => Self::Failure {
                message: e.to_string(),
            },
        }
    }
}
