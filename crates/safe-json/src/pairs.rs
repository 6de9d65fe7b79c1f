// crates/safe-json/src/pairs.rs

use crate::serialize::Serializer;
use crate::value::{Object, Value};

impl Serializer {
    /// Renders `value` as `"key":value,` pairs ready to be spliced into a
    /// larger JSON object.
    ///
    /// Objects spread their keys, errors are nested under `err`, and any other
    /// value becomes a single `data` field. Values with nothing to add
    /// (`Undefined`, `null`, `{}`) render as the empty string.
    pub fn render_pairs(&self, value: &Value) -> String {
        let text = match value {
            Value::Error(_) => {
                let wrapped: Object = [("err", value.clone())].into_iter().collect();
                self.to_json(&Value::Object(wrapped))
            }
            _ => self.to_json(value),
        };
        let Some(text) = text else {
            return String::new();
        };
        if text.is_empty() || text == "null" || text == "{}" {
            return String::new();
        }
        match text.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
            Some(inner) => format!("{inner},"),
            None => format!("\"data\":{text},"),
        }
    }
}
