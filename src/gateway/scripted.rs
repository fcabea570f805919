use super::{AuthGateway, Identity, SubmitPurpose};
use crate::error::GatewayError;
use crate::sanitize::SanitizedRecord;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Answers with queued responses in order; once the queue is empty every
/// call succeeds with a sequential identity.
#[derive(Debug, Default)]
pub struct ScriptedGateway {
    responses: Mutex<VecDeque<Result<Identity, GatewayError>>>,
    calls: Mutex<Vec<(SubmitPurpose, SanitizedRecord)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_responses(
        responses: impl IntoIterator<Item = Result<Identity, GatewayError>>,
    ) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            calls: Mutex::default(),
        }
    }

    pub fn push(&self, response: Result<Identity, GatewayError>) {
        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push_back(response);
    }

    pub fn calls(&self) -> Vec<(SubmitPurpose, SanitizedRecord)> {
        self.calls
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn answer(
        &self,
        purpose: SubmitPurpose,
        record: SanitizedRecord,
    ) -> Result<Identity, GatewayError> {
        let email = record.get_str("email").map(str::to_string);
        let call_number = {
            let mut calls = self
                .calls
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            calls.push((purpose, record));
            calls.len()
        };

        self.responses
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(Identity::new(format!("scripted-{call_number}"), email)))
    }
}

#[async_trait]
impl AuthGateway for ScriptedGateway {
    async fn register(&self, record: SanitizedRecord) -> Result<Identity, GatewayError> {
        self.answer(SubmitPurpose::Register, record)
    }

    async fn login(&self, record: SanitizedRecord) -> Result<Identity, GatewayError> {
        self.answer(SubmitPurpose::Login, record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn queued_responses_then_success() {
        let gateway = ScriptedGateway::with_responses([Err(GatewayError::Network)]);

        let first = gateway.register(SanitizedRecord::default()).await;
        assert_eq!(first, Err(GatewayError::Network));

        let second = gateway
            .submit(SubmitPurpose::Login, SanitizedRecord::default())
            .await
            .expect("empty queue succeeds");
        assert_eq!(second.id, "scripted-2");

        let purposes: Vec<SubmitPurpose> = gateway.calls().into_iter().map(|(p, _)| p).collect();
        assert_eq!(purposes, vec![SubmitPurpose::Register, SubmitPurpose::Login]);
    }
}
