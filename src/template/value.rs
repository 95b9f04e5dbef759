// ABOUTME: Closed value model for render contexts
// ABOUTME: Converts JSON data into context values and defines truthiness and text rendering

use indexmap::IndexMap;
use serde_json::{Number, Value as JsonValue};

use super::error::{Result, TemplateError};

/// Ordered mapping from field names to values, supplied per render call
pub type Context = IndexMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Number(Number),
    Bool(bool),
    Mapping(Context),
    Sequence(Vec<Value>),
}

impl Value {
    /// Name of the variant, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Mapping(_) => "mapping",
            Value::Sequence(_) => "sequence",
        }
    }

    /// Condition rule for `{{#if}}` blocks.
    ///
    /// Only the empty string, numeric zero and `false` are false. The string
    /// `"0"`, empty sequences and empty mappings are all true. An undefined
    /// value never reaches this method; callers treat it as false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::String(s) => !s.is_empty(),
            Value::Number(n) => n.as_f64() != Some(0.0),
            Value::Bool(b) => *b,
            Value::Mapping(_) | Value::Sequence(_) => true,
        }
    }

    /// Text form used when the value fills a `{{path}}` slot
    pub fn render_text(&self, path: &str) -> Result<String> {
        match self {
            Value::String(s) => Ok(s.clone()),
            Value::Number(n) => Ok(number_text(n)),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Mapping(_) | Value::Sequence(_) => Err(TemplateError::Type {
                path: path.to_string(),
                found: self.kind(),
            }),
        }
    }

    pub fn as_mapping(&self) -> Option<&Context> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Convert a JSON value. Returns `None` for `null`, which has no
    /// counterpart and reads as an undefined field.
    pub fn from_json(json: JsonValue) -> Option<Self> {
        match json {
            JsonValue::Null => None,
            JsonValue::String(s) => Some(Value::String(s)),
            JsonValue::Number(n) => Some(Value::Number(n)),
            JsonValue::Bool(b) => Some(Value::Bool(b)),
            JsonValue::Object(obj) => Some(Value::Mapping(context_from_object(obj))),
            // Null items keep their slot so @index and @last line up with the input
            JsonValue::Array(items) => Some(Value::Sequence(
                items
                    .into_iter()
                    .map(|item| Value::from_json(item).unwrap_or_else(|| Value::Mapping(Context::new())))
                    .collect(),
            )),
        }
    }
}

/// Integral floats print without a fraction (`60.0` -> `60`), the way
/// numbers read in a JSON document are usually shown on a card.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if !n.is_i64() && !n.is_u64() && f.fract() == 0.0 && f.abs() < 1e21 => {
            if f == 0.0 {
                "0".to_string()
            } else {
                format!("{:.0}", f)
            }
        }
        _ => n.to_string(),
    }
}

fn context_from_object(obj: serde_json::Map<String, JsonValue>) -> Context {
    obj.into_iter()
        .filter_map(|(key, value)| Value::from_json(value).map(|value| (key, value)))
        .collect()
}

/// Build a render context from a JSON document; the root must be an object
pub fn context_from_json(json: JsonValue) -> Result<Context> {
    match json {
        JsonValue::Object(obj) => Ok(context_from_object(obj)),
        other => Err(TemplateError::InvalidContext(format!(
            "expected a JSON object at the root, found {}",
            json_kind(&other)
        ))),
    }
}

/// Parse JSON text straight into a render context
pub fn context_from_str(text: &str) -> Result<Context> {
    let json: JsonValue = serde_json::from_str(text)?;
    context_from_json(json)
}

fn json_kind(json: &JsonValue) -> &'static str {
    match json {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n.into())
    }
}

impl From<Context> for Value {
    fn from(map: Context) -> Self {
        Value::Mapping(map)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Sequence(items)
    }
}
