use crate::core::{FieldId, value::Value};
use crate::state::step::FieldSpec;
use indexmap::IndexMap;

/// Not-yet-submitted field values, in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftRecord {
    values: IndexMap<FieldId, Value>,
}

impl DraftRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a FieldSpec>) -> Self {
        let values = fields
            .into_iter()
            .map(|field| (field.id.clone(), field.kind.default_value()))
            .collect();
        Self { values }
    }

    pub fn set(&mut self, id: impl Into<FieldId>, value: Value) -> Option<Value> {
        self.values.insert(id.into(), value)
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn text(&self, id: &str) -> std::borrow::Cow<'_, str> {
        self.get(id)
            .map(Value::to_text)
            .unwrap_or(std::borrow::Cow::Borrowed(""))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn is_blank(&self) -> bool {
        self.values.values().all(|value| match value {
            Value::Bool(flag) => !flag,
            other => other.is_empty(),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Value)> {
        self.values.iter()
    }
}
