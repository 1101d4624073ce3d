use serde_json::Value;

use crate::model_id::ModelId;

/// The minimal chat-completion body sent to every model.
///
/// Shared read-only across probes; `for_model` hands each probe its own copy.
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadTemplate {
    body: Value,
}

impl PayloadTemplate {
    pub fn new(prompt: &str, max_tokens: u32) -> Self {
        Self {
            body: serde_json::json!({
                "messages": [{"role": "user", "content": prompt}],
                "max_tokens": max_tokens,
            }),
        }
    }

    pub fn for_model(&self, model: &ModelId) -> Value {
        let mut body = self.body.clone();
        if let Value::Object(map) = &mut body {
            map.insert("model".to_string(), Value::String(model.to_string()));
        }
        body
    }
}

impl Default for PayloadTemplate {
    fn default() -> Self {
        Self::new("hi", 1)
    }
}
