// ABOUTME: Hook that merges process-wide default data into each render payload
// ABOUTME: Ships an identity hook and a hook filling configured string defaults

use std::borrow::Cow;
use std::collections::HashMap;

use super::payload::TemplateData;

pub trait DefaultData: Send + Sync {
    /// Add default values to a payload before execution
    fn apply(&self, data: &mut TemplateData);

    /// Whether `apply` leaves every payload untouched
    fn is_identity(&self) -> bool {
        false
    }

    /// Payload as the template should see it. Borrows when nothing changes.
    fn merge<'a>(&self, data: &'a TemplateData) -> Cow<'a, TemplateData> {
        if self.is_identity() {
            return Cow::Borrowed(data);
        }

        let mut merged = data.clone();
        self.apply(&mut merged);
        Cow::Owned(merged)
    }
}

/// Leaves payloads exactly as the caller built them.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultData for NoDefaults {
    fn apply(&self, _data: &mut TemplateData) {}

    fn is_identity(&self) -> bool {
        true
    }
}

/// Fills `string_map` entries the caller did not set.
#[derive(Debug, Clone, Default)]
pub struct StaticDefaults {
    strings: HashMap<String, String>,
}

impl StaticDefaults {
    pub fn new(strings: HashMap<String, String>) -> Self {
        Self { strings }
    }
}

impl DefaultData for StaticDefaults {
    fn apply(&self, data: &mut TemplateData) {
        for (key, value) in &self.strings {
            data.string_map
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
    }

    fn is_identity(&self) -> bool {
        self.strings.is_empty()
    }
}
