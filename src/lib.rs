pub mod config;
pub mod core;
pub mod definition;
pub mod driver;
pub mod error;
pub mod form;
pub mod forms;
pub mod gateway;
pub mod role;
pub mod sanitize;
pub mod state;
pub mod validators;

pub use crate::core::FieldId;
pub use crate::core::value::Value;

pub use state::draft;
pub use state::flow;
pub use state::step;
pub use state::validation;

pub use error::{ConfigError, FormError, GatewayError, SubmitError};
pub use form::{Advance, Completion, StepwiseForm, SubmitPhase};
pub use gateway::{AuthGateway, Identity, ScriptedGateway, SimulatedGateway, SubmitPurpose};
pub use role::Role;
