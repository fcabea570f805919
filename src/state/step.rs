use crate::core::{FieldId, value::Value};
use crate::state::validation::{StepValidator, ValidationContext, ValidationIssue};
use crate::validators::{self, Validator};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Active,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Secret,
    Number,
    Choice(Vec<String>),
    Toggle,
}

impl FieldKind {
    pub fn default_value(&self) -> Value {
        match self {
            Self::Toggle => Value::Bool(false),
            _ => Value::text(""),
        }
    }

    /// Interprets a raw line of user input for this kind of field.
    ///
    /// Numbers that fail to parse are kept as text so the range check can
    /// report them. Choices accept either the option text or its 1-based
    /// position in the list.
    pub fn parse_input(&self, raw: &str) -> Value {
        let trimmed = raw.trim();
        match self {
            Self::Number => trimmed
                .parse::<i64>()
                .map(Value::Number)
                .unwrap_or_else(|_| Value::text(raw)),
            Self::Toggle => Value::Bool(matches!(
                trimmed.to_ascii_lowercase().as_str(),
                "y" | "yes" | "true" | "1" | "on"
            )),
            Self::Choice(options) => trimmed
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|idx| options.get(idx))
                .map(|option| Value::text(option.as_str()))
                .unwrap_or_else(|| Value::text(trimmed)),
            Self::Text | Self::Secret => Value::text(raw),
        }
    }
}

/// How a field's value is prepared before it leaves the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sanitize {
    #[default]
    Trim,
    Lowercase,
    Uppercase,
    Keep,
    Omit,
}

pub struct FieldSpec {
    pub id: FieldId,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub validators: Vec<Validator>,
    pub sanitize: Sanitize,
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("validators", &self.validators.len())
            .field("sanitize", &self.sanitize)
            .finish()
    }
}

impl FieldSpec {
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required: false,
            validators: Vec::new(),
            sanitize: Sanitize::default(),
        }
    }

    pub fn text(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn secret(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Secret).sanitize(Sanitize::Keep)
    }

    pub fn number(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Number)
    }

    pub fn choice<I, S>(id: impl Into<FieldId>, label: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options = options.into_iter().map(Into::into).collect();
        Self::new(id, label, FieldKind::Choice(options))
    }

    pub fn toggle(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Toggle).sanitize(Sanitize::Keep)
    }

    /// Marks the field required; the check always runs before other validators.
    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.required = true;
        self.validators.insert(0, validators::required(message));
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn sanitize(mut self, sanitize: Sanitize) -> Self {
        self.sanitize = sanitize;
        self
    }

    /// First failing message for `value`. Blank optional fields skip their checks.
    pub fn check(&self, value: &Value) -> Result<(), String> {
        if value.is_empty() && !self.required {
            return Ok(());
        }
        validators::run_validators(&self.validators, &value.to_text())
    }
}

pub struct Step {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub fields: Vec<FieldSpec>,
    pub validators: Vec<StepValidator>,
}

impl Step {
    pub fn builder(id: impl Into<String>, title: impl Into<String>) -> StepBuilder {
        StepBuilder::new(id, title)
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id == id)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.field(id).is_some()
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.iter().map(|field| &field.id)
    }
}

pub struct StepBuilder {
    id: String,
    title: String,
    description: Option<String>,
    fields: Vec<FieldSpec>,
    validators: Vec<StepValidator>,
}

impl StepBuilder {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            fields: Vec::new(),
            validators: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldSpec>) -> Self {
        self.fields.extend(fields);
        self
    }

    pub fn validator(mut self, validator: StepValidator) -> Self {
        self.validators.push(validator);
        self
    }

    pub fn validate(
        mut self,
        f: impl Fn(&ValidationContext<'_>) -> Option<ValidationIssue> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(f));
        self
    }

    /// Cross-field equality: `field` must equal `other`, reported on `field`.
    pub fn matches(
        self,
        field: impl Into<FieldId>,
        other: impl Into<FieldId>,
        message: impl Into<String>,
    ) -> Self {
        let field = field.into();
        let other = other.into();
        let message = message.into();
        self.validate(move |ctx: &ValidationContext<'_>| {
            if ctx.text(field.as_str()) == ctx.text(other.as_str()) {
                None
            } else {
                Some(ValidationIssue::field(field.clone(), message.clone()))
            }
        })
    }

    pub fn build(self) -> Step {
        Step {
            id: self.id,
            title: self.title,
            description: self.description,
            fields: self.fields,
            validators: self.validators,
        }
    }
}
