use crate::core::value::Value;
use crate::state::draft::DraftRecord;
use crate::state::flow::Flow;
use crate::state::step::{FieldKind, Sanitize};
use indexmap::IndexMap;
use serde::Serialize;

/// The draft as it is handed to the endpoint: trimmed, normalized, and
/// without confirmation-only fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SanitizedRecord(IndexMap<String, serde_json::Value>);

impl SanitizedRecord {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(serde_json::Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.0
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        )
    }
}

pub fn sanitize(flow: &Flow, draft: &DraftRecord) -> SanitizedRecord {
    let mut out = IndexMap::new();
    for field in flow.fields() {
        if field.sanitize == Sanitize::Omit {
            continue;
        }
        let value = draft
            .get(field.id.as_str())
            .cloned()
            .unwrap_or_else(|| field.kind.default_value());
        let cleaned = match (&field.kind, value) {
            (FieldKind::Number, Value::Text(text)) => decimal(&text)
                .unwrap_or_else(|| clean(Value::Text(text), field.sanitize)),
            (_, value) => clean(value, field.sanitize),
        };
        out.insert(field.id.to_string(), cleaned);
    }
    SanitizedRecord(out)
}

/// Numeric text such as `2.5` typed into a number field.
fn decimal(text: &str) -> Option<serde_json::Value> {
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(n.into());
    }
    let n = text.parse::<f64>().ok()?;
    serde_json::Number::from_f64(n).map(serde_json::Value::Number)
}

fn clean(value: Value, mode: Sanitize) -> serde_json::Value {
    match value {
        Value::None => serde_json::Value::Null,
        Value::Bool(flag) => serde_json::Value::Bool(flag),
        Value::Number(n) => serde_json::Value::from(n),
        Value::Text(text) => {
            let text = match mode {
                Sanitize::Trim => text.trim().to_string(),
                Sanitize::Lowercase => text.trim().to_lowercase(),
                Sanitize::Uppercase => text.trim().to_uppercase(),
                Sanitize::Keep | Sanitize::Omit => text,
            };
            serde_json::Value::String(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::step::{FieldSpec, Step};
    use serde_json::json;

    fn flow() -> Flow {
        Flow::new(vec![
            Step::builder("account", "Account")
                .field(FieldSpec::text("email", "Email").sanitize(Sanitize::Lowercase))
                .field(FieldSpec::text("name", "Name"))
                .field(FieldSpec::number("years", "Years"))
                .field(FieldSpec::text("license", "License").sanitize(Sanitize::Uppercase))
                .build(),
            Step::builder("security", "Security")
                .field(FieldSpec::secret("password", "Password"))
                .field(FieldSpec::secret("confirm", "Confirm").sanitize(Sanitize::Omit))
                .build(),
        ])
    }

    #[test]
    fn record_is_normalized() {
        let flow = flow();
        let mut draft = DraftRecord::from_fields(flow.fields());
        draft.set("email", Value::text("  Dr.Who@Example.COM "));
        draft.set("name", Value::text("  Ada "));
        draft.set("years", Value::Number(12));
        draft.set("license", Value::text(" md20345 "));
        draft.set("password", Value::text(" Abcdef1! "));
        draft.set("confirm", Value::text(" Abcdef1! "));

        let record = sanitize(&flow, &draft);

        assert_eq!(
            record.to_json(),
            json!({
                "email": "dr.who@example.com",
                "name": "Ada",
                "years": 12,
                "license": "MD20345",
                "password": " Abcdef1! ",
            })
        );
        assert!(!record.contains("confirm"));
        assert_eq!(
            record.keys().collect::<Vec<_>>(),
            vec!["email", "name", "years", "license", "password"]
        );
    }

    #[test]
    fn decimal_text_in_number_field_is_sent_as_number() {
        let flow = flow();
        let mut draft = DraftRecord::from_fields(flow.fields());
        draft.set("years", Value::text(" 2.5 "));

        let record = sanitize(&flow, &draft);
        assert_eq!(record.get("years"), Some(&json!(2.5)));
    }
}
