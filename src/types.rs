use crate::constants::{BUSINESS_NAME_FIELD, EMAILS_FIELD, KEY_SEPARATOR, PHONE_NUMBER_FIELD};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single business-contact record.
///
/// Records carry no fixed schema: every field read from the input is kept,
/// in order, and written back out untouched unless a pipeline stage rewrites
/// it explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        self.0.get_mut(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// `Emails` is present at all, whatever its value.
    pub fn has_emails_field(&self) -> bool {
        self.contains(EMAILS_FIELD)
    }

    /// `Emails` is present and carries something.
    pub fn has_email(&self) -> bool {
        self.get(EMAILS_FIELD).is_some_and(is_non_empty)
    }

    /// Business name and phone number joined into the duplicate-detection key.
    pub fn composite_key(&self) -> String {
        format!(
            "{}{}{}",
            field_text(self.get(BUSINESS_NAME_FIELD)),
            KEY_SEPARATOR,
            field_text(self.get(PHONE_NUMBER_FIELD))
        )
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Text used for a field inside a composite key.
fn field_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_non_empty(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}
