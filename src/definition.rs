//! Forms described in YAML instead of code.
//!
//! ```yaml
//! name: newsletter
//! purpose: register
//! steps:
//!   - id: contact
//!     title: Contact
//!     fields:
//!       - id: email
//!         label: Email
//!         sanitize: lowercase
//!         rules:
//!           - rule: required
//!           - rule: email
//! ```

use crate::error::ConfigError;
use crate::form::StepwiseForm;
use crate::gateway::SubmitPurpose;
use crate::state::step::{FieldKind, FieldSpec, Sanitize, Step};
use crate::validators;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct FormDefinition {
    pub name: String,
    #[serde(default)]
    pub purpose: SubmitPurpose,
    pub steps: Vec<StepDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StepDefinition {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub kind: KindDefinition,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub sanitize: Option<Sanitize>,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindDefinition {
    #[default]
    Text,
    Secret,
    Number,
    Choice,
    Toggle,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Rule {
    Required {
        #[serde(default)]
        message: Option<String>,
    },
    MinLength {
        min: usize,
        #[serde(default)]
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        #[serde(default)]
        message: Option<String>,
    },
    Email {
        #[serde(default)]
        message: Option<String>,
    },
    Phone {
        #[serde(default)]
        message: Option<String>,
    },
    LicenseNumber {
        #[serde(default)]
        message: Option<String>,
    },
    Password {
        #[serde(default)]
        message: Option<String>,
    },
    ZipCode {
        #[serde(default)]
        message: Option<String>,
    },
    Range {
        min: i64,
        max: i64,
        #[serde(default)]
        message: Option<String>,
    },
    OneOf {
        #[serde(default)]
        options: Vec<String>,
        #[serde(default)]
        message: Option<String>,
    },
    Pattern {
        pattern: String,
        #[serde(default)]
        message: Option<String>,
    },
    Matches {
        field: String,
        #[serde(default)]
        message: Option<String>,
    },
}

impl FormDefinition {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&source)
    }

    pub fn build(&self) -> Result<StepwiseForm, ConfigError> {
        if self.steps.is_empty() {
            return Err(ConfigError::EmptyForm(self.name.clone()));
        }

        let mut known = HashSet::new();
        for field in self.steps.iter().flat_map(|step| step.fields.iter()) {
            if !known.insert(field.id.as_str()) {
                return Err(ConfigError::DuplicateField(field.id.clone()));
            }
        }

        let steps = self
            .steps
            .iter()
            .map(|step| build_step(step, &known))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(StepwiseForm::new(self.name.clone(), self.purpose, steps))
    }
}

fn build_step(def: &StepDefinition, known: &HashSet<&str>) -> Result<Step, ConfigError> {
    let mut builder = Step::builder(def.id.clone(), def.title.clone());
    if let Some(description) = &def.description {
        builder = builder.description(description.clone());
    }

    for field in &def.fields {
        builder = builder.field(build_field(field)?);
        for rule in &field.rules {
            if let Rule::Matches {
                field: target,
                message,
            } = rule
            {
                if !known.contains(target.as_str()) {
                    return Err(ConfigError::UnknownField {
                        field: field.id.clone(),
                        target: target.clone(),
                    });
                }
                let message = message
                    .clone()
                    .unwrap_or_else(|| format!("{} does not match", field.label));
                builder = builder.matches(field.id.as_str(), target.as_str(), message);
            }
        }
    }

    Ok(builder.build())
}

fn build_field(def: &FieldDefinition) -> Result<FieldSpec, ConfigError> {
    let kind = match def.kind {
        KindDefinition::Text => FieldKind::Text,
        KindDefinition::Secret => FieldKind::Secret,
        KindDefinition::Number => FieldKind::Number,
        KindDefinition::Choice => FieldKind::Choice(def.options.clone()),
        KindDefinition::Toggle => FieldKind::Toggle,
    };
    let default_sanitize = match def.kind {
        KindDefinition::Secret | KindDefinition::Toggle => Sanitize::Keep,
        _ => Sanitize::Trim,
    };

    let label = def.label.as_str();
    let mut spec = FieldSpec::new(def.id.as_str(), label, kind)
        .sanitize(def.sanitize.unwrap_or(default_sanitize));

    for rule in &def.rules {
        spec = match rule {
            Rule::Required { message } => {
                spec.required(or_default(message, || format!("{label} is required")))
            }
            Rule::MinLength { min, message } => spec.validator(validators::min_length(
                *min,
                or_default(message, || format!("{label} must be at least {min} characters")),
            )),
            Rule::MaxLength { max, message } => spec.validator(validators::max_length(
                *max,
                or_default(message, || format!("{label} must be less than {max} characters")),
            )),
            Rule::Email { message } => spec.validator(validators::email(or_default(message, || {
                "Please enter a valid email address".to_string()
            }))),
            Rule::Phone { message } => spec.validator(validators::phone(or_default(message, || {
                "Please enter a valid phone number".to_string()
            }))),
            Rule::LicenseNumber { message } => {
                spec.validator(validators::license_number(or_default(message, || {
                    "License number must be 6-12 alphanumeric characters".to_string()
                })))
            }
            Rule::Password { message } => {
                spec.validator(validators::password_strength(or_default(message, || {
                    validators::STRONG_PASSWORD_MESSAGE.to_string()
                })))
            }
            Rule::ZipCode { message } => spec.validator(validators::zip_code(or_default(
                message,
                || "Please enter a valid ZIP/Postal code".to_string(),
            ))),
            Rule::Range { min, max, message } => spec.validator(validators::number_range(
                *min,
                *max,
                or_default(message, || format!("{label} must be between {min} and {max}")),
            )),
            Rule::OneOf { options, message } => {
                let options = if options.is_empty() {
                    def.options.clone()
                } else {
                    options.clone()
                };
                spec.validator(validators::one_of(
                    options,
                    or_default(message, || {
                        format!("Please choose a {} from the list", label.to_lowercase())
                    }),
                ))
            }
            Rule::Pattern { pattern, message } => {
                let validator = validators::pattern(
                    pattern,
                    or_default(message, || format!("{label} has an invalid format")),
                )
                .map_err(|source| ConfigError::InvalidPattern {
                    field: def.id.clone(),
                    source,
                })?;
                spec.validator(validator)
            }
            // Cross-field rules are attached to the step.
            Rule::Matches { .. } => spec,
        };
    }

    Ok(spec)
}

fn or_default(message: &Option<String>, fallback: impl FnOnce() -> String) -> String {
    message.clone().unwrap_or_else(fallback)
}
