use crate::core::{FieldId, value::Value};

#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    FieldChanged {
        id: FieldId,
        value: Value,
    },
    ErrorRaised {
        id: FieldId,
        message: String,
    },
    ErrorCleared {
        id: FieldId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Error,
}

/// The single transient message shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}
