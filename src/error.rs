use crate::core::FieldId;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Misuse of a form: these never come from what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("unknown field `{0}`")]
    UnknownField(FieldId),
    #[error("step {0} does not exist")]
    NoSuchStep(usize),
    #[error("a submission is already in flight")]
    Busy,
    #[error("submit is only available on the final step")]
    NotOnFinalStep,
    #[error("no submission is in flight")]
    NoSubmitInFlight,
}

/// Failure reported by the authentication / registration endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayError {
    #[error("Email already exists")]
    EmailTaken,
    #[error("License number already registered")]
    LicenseTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account not found")]
    AccountNotFound,
    #[error("Account locked")]
    AccountLocked,
    #[error("Network error")]
    Network,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmitError {
    #[error("step {step} has fields that need attention")]
    Invalid { step: usize },
    #[error(transparent)]
    Rejected(#[from] GatewayError),
    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("field `{field}` has an invalid pattern: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },
    #[error("field `{field}` refers to unknown field `{target}`")]
    UnknownField { field: String, target: String },
    #[error("field `{0}` is declared more than once")]
    DuplicateField(String),
    #[error("failure weights add up to {total}, expected at most 1.0")]
    InvalidWeights { total: f64 },
    #[error("form `{0}` has no steps")]
    EmptyForm(String),
}
