pub mod event;

pub use event::{FormEvent, Notification, Severity};

use crate::core::value::Value;
use crate::error::{FormError, GatewayError, SubmitError};
use crate::gateway::{AuthGateway, Identity, SubmitPurpose};
use crate::sanitize::{SanitizedRecord, sanitize};
use crate::state::draft::DraftRecord;
use crate::state::flow::Flow;
use crate::state::step::Step;
use crate::state::validation::{self, ErrorMap};
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved { from: usize, to: usize },
    Blocked,
    /// The final step validated; there is nothing further to move to.
    AtFinalStep,
}

/// Handed out by [`StepwiseForm::begin_submit`]: what to send, and where.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingSubmit {
    pub purpose: SubmitPurpose,
    pub record: SanitizedRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Completion {
    pub identity: Identity,
    pub record: SanitizedRecord,
}

/// A multi-step form: the draft, its errors and the step index, plus the
/// submission lifecycle.
///
/// Every operation runs to completion before the next one. The only
/// suspension point is the endpoint call inside [`StepwiseForm::submit`];
/// while it is outstanding the form rejects edits and navigation with
/// [`FormError::Busy`].
pub struct StepwiseForm {
    name: String,
    purpose: SubmitPurpose,
    flow: Flow,
    draft: DraftRecord,
    errors: ErrorMap,
    in_flight: Option<SanitizedRecord>,
    notification: Option<Notification>,
}

impl std::fmt::Debug for StepwiseForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepwiseForm")
            .field("name", &self.name)
            .field("purpose", &self.purpose)
            .finish_non_exhaustive()
    }
}

impl StepwiseForm {
    pub fn new(name: impl Into<String>, purpose: SubmitPurpose, steps: Vec<Step>) -> Self {
        let flow = Flow::new(steps);
        let draft = DraftRecord::from_fields(flow.fields());
        Self {
            name: name.into(),
            purpose,
            flow,
            draft,
            errors: ErrorMap::default(),
            in_flight: None,
            notification: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn purpose(&self) -> SubmitPurpose {
        self.purpose
    }

    pub fn flow(&self) -> &Flow {
        &self.flow
    }

    pub fn draft(&self) -> &DraftRecord {
        &self.draft
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn error(&self, id: &str) -> Option<&str> {
        self.errors.get(id)
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn phase(&self) -> SubmitPhase {
        if self.in_flight.is_some() {
            SubmitPhase::Submitting
        } else {
            SubmitPhase::Editing
        }
    }

    pub fn current_step_index(&self) -> usize {
        self.flow.current_index()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.flow.current_step()
    }

    pub fn step_count(&self) -> usize {
        self.flow.len()
    }

    pub fn is_final_step(&self) -> bool {
        self.flow.is_last()
    }

    /// Stores `value` and drops any error recorded for the field.
    pub fn update_field(
        &mut self,
        id: &str,
        value: impl Into<Value>,
    ) -> Result<Vec<FormEvent>, FormError> {
        self.ensure_editing()?;
        let field_id = self
            .flow
            .field(id)
            .map(|field| field.id.clone())
            .ok_or_else(|| FormError::UnknownField(id.into()))?;

        let value = value.into();
        let mut events = Vec::new();
        if self.draft.get(id) != Some(&value) {
            events.push(FormEvent::FieldChanged {
                id: field_id.clone(),
                value: value.clone(),
            });
        }
        self.draft.set(field_id.clone(), value);
        self.notification = None;
        self.errors.clear_step_errors();
        if self.errors.clear_error(id).is_some() {
            events.push(FormEvent::ErrorCleared {
                id: field_id.clone(),
            });
        }

        debug!(form = %self.name, field = %field_id, "field updated");
        Ok(events)
    }

    /// Validates one field as the user leaves it.
    pub fn blur_field(&mut self, id: &str) -> Result<Vec<FormEvent>, FormError> {
        self.ensure_editing()?;
        let step = self
            .flow
            .step_of(id)
            .and_then(|index| self.flow.step_at(index))
            .ok_or_else(|| FormError::UnknownField(id.into()))?;

        let Some(field) = step.field(id) else {
            return Err(FormError::UnknownField(id.into()));
        };
        let field_id = field.id.clone();

        let events = match validation::validate_field(step, &self.draft, id) {
            Some(message) => {
                debug!(form = %self.name, field = %field_id, %message, "field invalid");
                self.errors.set_error(field_id.clone(), message.clone());
                vec![FormEvent::ErrorRaised {
                    id: field_id,
                    message,
                }]
            }
            None => match self.errors.clear_error(id) {
                Some(_) => vec![FormEvent::ErrorCleared { id: field_id }],
                None => Vec::new(),
            },
        };
        Ok(events)
    }

    /// Runs the predicates of step `index` and records their failures.
    pub fn validate_step(&mut self, index: usize) -> Result<bool, FormError> {
        self.ensure_editing()?;
        let step = self.flow.step_at(index).ok_or(FormError::NoSuchStep(index))?;
        let report = validation::validate_step(step, &self.draft);
        self.errors.apply(step, &report);

        debug!(
            form = %self.name,
            step = index,
            invalid_fields = report.field_errors.len(),
            step_errors = report.step_errors.len(),
            "step validated"
        );
        Ok(report.is_valid())
    }

    pub fn advance(&mut self) -> Result<Advance, FormError> {
        self.ensure_editing()?;
        let from = self.flow.current_index();
        if !self.validate_step(from)? {
            info!(form = %self.name, step = from, "advance blocked by validation");
            return Ok(Advance::Blocked);
        }
        if !self.flow.advance() {
            return Ok(Advance::AtFinalStep);
        }

        let to = self.flow.current_index();
        info!(form = %self.name, from, to, "advanced");
        Ok(Advance::Moved { from, to })
    }

    /// Steps back without validating. Returns false on the first step.
    pub fn retreat(&mut self) -> Result<bool, FormError> {
        self.ensure_editing()?;
        let from = self.flow.current_index();
        let moved = self.flow.retreat();
        if moved {
            info!(form = %self.name, from, to = self.flow.current_index(), "retreated");
        }
        Ok(moved)
    }

    /// Validates the final step and enters the submitting phase.
    pub fn begin_submit(&mut self) -> Result<PendingSubmit, SubmitError> {
        self.ensure_editing()?;
        if self.flow.is_empty() {
            return Err(FormError::NoSuchStep(0).into());
        }
        if !self.flow.is_last() {
            return Err(FormError::NotOnFinalStep.into());
        }

        let step = self.flow.current_index();
        if !self.validate_step(step)? {
            info!(form = %self.name, step, "submit blocked by validation");
            return Err(SubmitError::Invalid { step });
        }

        let record = sanitize(&self.flow, &self.draft);
        self.in_flight = Some(record.clone());
        self.notification = None;
        info!(form = %self.name, purpose = ?self.purpose, "submission started");
        Ok(PendingSubmit {
            purpose: self.purpose,
            record,
        })
    }

    /// Applies the endpoint's answer. Success resets the form; failure keeps
    /// the draft for another attempt.
    pub fn finish_submit(
        &mut self,
        outcome: Result<Identity, GatewayError>,
    ) -> Result<Completion, SubmitError> {
        let record = self.in_flight.take().ok_or(FormError::NoSubmitInFlight)?;

        match outcome {
            Ok(identity) => {
                info!(form = %self.name, identity = %identity.id, "submission accepted");
                self.reset();
                self.notification = Some(Notification::success(self.purpose.success_message()));
                Ok(Completion { identity, record })
            }
            Err(err) => {
                warn!(form = %self.name, error = %err, "submission rejected");
                self.notification = Some(Notification::error(err.to_string()));
                Err(SubmitError::Rejected(err))
            }
        }
    }

    pub async fn submit<G>(&mut self, gateway: &G) -> Result<Completion, SubmitError>
    where
        G: AuthGateway + ?Sized,
    {
        let pending = self.begin_submit()?;
        let outcome = gateway.submit(pending.purpose, pending.record).await;
        self.finish_submit(outcome)
    }

    /// Discards the draft and returns to the first step.
    pub fn reset(&mut self) {
        self.flow.reset();
        self.draft = DraftRecord::from_fields(self.flow.fields());
        self.errors.clear();
    }

    fn ensure_editing(&self) -> Result<(), FormError> {
        match self.phase() {
            SubmitPhase::Editing => Ok(()),
            SubmitPhase::Submitting => Err(FormError::Busy),
        }
    }
}
