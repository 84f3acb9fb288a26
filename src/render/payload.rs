// ABOUTME: Per-request data passed into template execution
// ABOUTME: Holds typed maps plus CSRF token and flash, warning, and error messages

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::collections::HashMap;

/// Data bag for a single render call. Templates see the fields by their
/// snake_case names, e.g. `{{string_map.title}}` or `{{csrf_token}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateData {
    pub string_map: HashMap<String, String>,
    pub int_map: HashMap<String, i64>,
    pub float_map: HashMap<String, f32>,
    pub data: HashMap<String, JsonValue>,
    pub csrf_token: String,
    pub flash: String,
    pub warning: String,
    pub error: String,
}

impl TemplateData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_string(mut self, key: &str, value: &str) -> Self {
        self.string_map.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_int(mut self, key: &str, value: i64) -> Self {
        self.int_map.insert(key.to_string(), value);
        self
    }

    pub fn with_float(mut self, key: &str, value: f32) -> Self {
        self.float_map.insert(key.to_string(), value);
        self
    }

    pub fn with_data(mut self, key: &str, value: JsonValue) -> Self {
        self.data.insert(key.to_string(), value);
        self
    }

    pub fn with_csrf_token(mut self, token: &str) -> Self {
        self.csrf_token = token.to_string();
        self
    }

    pub fn with_flash(mut self, message: &str) -> Self {
        self.flash = message.to_string();
        self
    }

    pub fn with_warning(mut self, message: &str) -> Self {
        self.warning = message.to_string();
        self
    }

    pub fn with_error(mut self, message: &str) -> Self {
        self.error = message.to_string();
        self
    }

    /// Add multiple string values
    pub fn extend_strings(&mut self, values: HashMap<String, String>) {
        self.string_map.extend(values);
    }
}
