use crate::core::{FieldId, value::Value};
use crate::state::draft::DraftRecord;
use crate::state::step::Step;
use indexmap::IndexMap;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationTarget {
    Field(FieldId),
    Step,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub target: ValidationTarget,
    pub message: String,
}

impl ValidationIssue {
    pub fn field(id: impl Into<FieldId>, message: impl Into<String>) -> Self {
        Self {
            target: ValidationTarget::Field(id.into()),
            message: message.into(),
        }
    }

    pub fn step(message: impl Into<String>) -> Self {
        Self {
            target: ValidationTarget::Step,
            message: message.into(),
        }
    }
}

/// Read-only view of the draft handed to step-level validators.
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    step_id: &'a str,
    draft: &'a DraftRecord,
}

impl<'a> ValidationContext<'a> {
    pub fn new(step_id: &'a str, draft: &'a DraftRecord) -> Self {
        Self { step_id, draft }
    }

    pub fn step_id(&self) -> &str {
        self.step_id
    }

    pub fn value(&self, id: &str) -> Option<&'a Value> {
        self.draft.get(id)
    }

    pub fn text(&self, id: &str) -> Cow<'a, str> {
        self.draft.text(id)
    }

    pub fn number(&self, id: &str) -> Option<i64> {
        self.value(id).and_then(Value::as_number)
    }

    pub fn bool_value(&self, id: &str) -> Option<bool> {
        self.value(id).and_then(Value::as_bool)
    }

    pub fn is_empty(&self, id: &str) -> bool {
        self.value(id).is_none_or(Value::is_empty)
    }
}

pub type StepValidator =
    Box<dyn Fn(&ValidationContext<'_>) -> Option<ValidationIssue> + Send + Sync>;

/// Outcome of validating one step against a draft.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepReport {
    pub field_errors: IndexMap<FieldId, String>,
    pub step_errors: Vec<String>,
}

impl StepReport {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty() && self.step_errors.is_empty()
    }

    pub fn error_for(&self, id: &str) -> Option<&str> {
        self.field_errors.get(id).map(String::as_str)
    }
}

/// Runs every predicate of `step` against `draft`, keeping the first failure per field.
pub fn validate_step(step: &Step, draft: &DraftRecord) -> StepReport {
    let mut report = StepReport::default();

    for field in &step.fields {
        let fallback = field.kind.default_value();
        let value = draft.get(field.id.as_str()).unwrap_or(&fallback);
        if let Err(message) = field.check(value) {
            report.field_errors.insert(field.id.clone(), message);
        }
    }

    let ctx = ValidationContext::new(&step.id, draft);
    for issue in step.validators.iter().filter_map(|validator| validator(&ctx)) {
        match issue.target {
            ValidationTarget::Field(id) if step.has_field(id.as_str()) => {
                report.field_errors.entry(id).or_insert(issue.message);
            }
            _ => report.step_errors.push(issue.message),
        }
    }

    report
}

/// Validates a single field of `step`, including cross-field issues aimed at it.
pub fn validate_field(step: &Step, draft: &DraftRecord, id: &str) -> Option<String> {
    let field = step.field(id)?;
    let fallback = field.kind.default_value();
    let value = draft.get(id).unwrap_or(&fallback);
    if let Err(message) = field.check(value) {
        return Some(message);
    }

    let ctx = ValidationContext::new(&step.id, draft);
    step.validators
        .iter()
        .filter_map(|validator| validator(&ctx))
        .find_map(|issue| match issue.target {
            ValidationTarget::Field(target) if target == id => Some(issue.message),
            _ => None,
        })
}

/// Field name to message. An absent entry means the field has no error.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ErrorMap {
    entries: IndexMap<FieldId, String>,
    step_errors: Vec<String>,
}

impl ErrorMap {
    pub fn set_error(&mut self, id: impl Into<FieldId>, error: impl Into<String>) {
        self.entries.insert(id.into(), error.into());
    }

    pub fn clear_error(&mut self, id: &str) -> Option<String> {
        self.entries.shift_remove(id)
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.entries.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.step_errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(id, error)| (id.as_str(), error.as_str()))
    }

    pub fn step_errors(&self) -> &[String] {
        self.step_errors.as_slice()
    }

    pub fn clear_step_errors(&mut self) {
        self.step_errors.clear();
    }

    pub fn has_errors_in(&self, step: &Step) -> bool {
        step.field_ids().any(|id| self.contains(id.as_str()))
    }

    /// Replaces whatever was recorded for `step`'s fields with `report`.
    pub fn apply(&mut self, step: &Step, report: &StepReport) {
        self.entries.retain(|id, _| !step.has_field(id.as_str()));
        for (id, message) in &report.field_errors {
            self.entries.insert(id.clone(), message.clone());
        }
        self.step_errors = report.step_errors.clone();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.step_errors.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::step::FieldSpec;
    use crate::validators;

    fn security_step() -> Step {
        Step::builder("security", "Security")
            .field(
                FieldSpec::secret("password", "Password")
                    .required("Password is required")
                    .validator(validators::password_strength("Password too weak")),
            )
            .field(FieldSpec::secret("confirm", "Confirm").required("Please confirm your password"))
            .matches("confirm", "password", "Passwords do not match")
            .build()
    }

    fn draft_for(step: &Step, values: &[(&str, &str)]) -> DraftRecord {
        let mut draft = DraftRecord::from_fields(step.fields.iter());
        for (id, value) in values {
            draft.set(*id, Value::text(*value));
        }
        draft
    }

    #[test]
    fn first_failure_per_field_is_reported() {
        let step = security_step();
        let draft = draft_for(&step, &[("password", "abc"), ("confirm", "")]);
        let report = validate_step(&step, &draft);

        assert!(!report.is_valid());
        assert_eq!(report.error_for("password"), Some("Password too weak"));
        assert_eq!(report.error_for("confirm"), Some("Please confirm your password"));
    }

    #[test]
    fn cross_field_issue_lands_on_field() {
        let step = security_step();
        let draft = draft_for(&step, &[("password", "Abcdef1!"), ("confirm", "Abcdef1?")]);
        let report = validate_step(&step, &draft);

        assert_eq!(report.error_for("confirm"), Some("Passwords do not match"));
        assert_eq!(report.error_for("password"), None);
        assert_eq!(
            validate_field(&step, &draft, "confirm").as_deref(),
            Some("Passwords do not match")
        );
        assert_eq!(validate_field(&step, &draft, "password"), None);
    }

    #[test]
    fn valid_step_has_no_entries() {
        let step = security_step();
        let draft = draft_for(&step, &[("password", "Abcdef1!"), ("confirm", "Abcdef1!")]);
        let report = validate_step(&step, &draft);
        assert!(report.is_valid());

        let mut errors = ErrorMap::default();
        errors.set_error("password", "stale");
        errors.set_error("elsewhere", "kept");
        errors.apply(&step, &report);
        assert!(!errors.contains("password"));
        assert_eq!(errors.get("elsewhere"), Some("kept"));
        assert!(!errors.has_errors_in(&step));
    }

    #[test]
    fn step_level_issues_are_collected() {
        let step = Step::builder("terms", "Terms")
            .field(FieldSpec::toggle("accept", "Accept"))
            .validate(|ctx| {
                (ctx.bool_value("accept") != Some(true))
                    .then(|| ValidationIssue::step("Terms must be accepted"))
            })
            .build();
        let draft = DraftRecord::from_fields(step.fields.iter());
        let report = validate_step(&step, &draft);

        assert_eq!(report.step_errors, vec!["Terms must be accepted".to_string()]);
        assert!(report.field_errors.is_empty());
        assert!(!report.is_valid());
    }
}
