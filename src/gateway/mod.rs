pub mod scripted;
pub mod simulated;

pub use scripted::ScriptedGateway;
pub use simulated::SimulatedGateway;

use crate::error::GatewayError;
use crate::sanitize::SanitizedRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a form's submission asks the endpoint to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPurpose {
    #[default]
    Register,
    Login,
}

impl SubmitPurpose {
    pub fn success_message(self) -> &'static str {
        match self {
            Self::Register => "Registration successful! Redirecting to login...",
            Self::Login => "Login successful! Redirecting to dashboard...",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub id: String,
    pub email: Option<String>,
}

impl Identity {
    pub fn new(id: impl Into<String>, email: Option<String>) -> Self {
        Self {
            id: id.into(),
            email,
        }
    }
}

/// The authentication / registration endpoint a form submits to.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    async fn register(&self, record: SanitizedRecord) -> Result<Identity, GatewayError>;

    async fn login(&self, record: SanitizedRecord) -> Result<Identity, GatewayError>;

    async fn submit(
        &self,
        purpose: SubmitPurpose,
        record: SanitizedRecord,
    ) -> Result<Identity, GatewayError> {
        match purpose {
            SubmitPurpose::Register => self.register(record).await,
            SubmitPurpose::Login => self.login(record).await,
        }
    }
}
