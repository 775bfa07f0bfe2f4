//! Observable view states for the controllers

use std::fmt;

/// State of the main action screen (shutdown / wake)
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Running,
    Succeeded(String),
    Failed(String),
}

impl ViewState {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Succeeded or Failed: waiting to be acknowledged
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(msg) | Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewState::Idle => write!(f, "idle"),
            ViewState::Running => write!(f, "running"),
            ViewState::Succeeded(msg) => write!(f, "succeeded: {}", msg),
            ViewState::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

/// State of the last save action on the settings screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettingsOpState {
    #[default]
    Idle,
    Saving,
    Saved(String),
    Failed(String),
}

impl SettingsOpState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Saved(_) | Self::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Saved(msg) | Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for SettingsOpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsOpState::Idle => write!(f, "idle"),
            SettingsOpState::Saving => write!(f, "saving"),
            SettingsOpState::Saved(msg) => write!(f, "saved: {}", msg),
            SettingsOpState::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

/// State of the connection test on the settings screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TestState {
    #[default]
    NotTested,
    Testing,
    Succeeded(String),
    Failed(String),
}

impl TestState {
    pub fn is_testing(&self) -> bool {
        matches!(self, Self::Testing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(msg) | Self::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl fmt::Display for TestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestState::NotTested => write!(f, "not tested"),
            TestState::Testing => write!(f, "testing"),
            TestState::Succeeded(msg) => write!(f, "succeeded: {}", msg),
            TestState::Failed(msg) => write!(f, "failed: {}", msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ViewState::default(), ViewState::Idle);
        assert_eq!(SettingsOpState::default(), SettingsOpState::Idle);
        assert_eq!(TestState::default(), TestState::NotTested);
    }

    #[test]
    fn test_terminal_states_carry_message() {
        let done = ViewState::Succeeded("ok".into());
        assert!(done.is_terminal());
        assert_eq!(done.message(), Some("ok"));
        assert!(!ViewState::Running.is_terminal());
        assert_eq!(ViewState::Running.message(), None);
        assert_eq!(TestState::Failed("no".into()).message(), Some("no"));
    }
}
