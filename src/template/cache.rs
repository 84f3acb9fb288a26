// ABOUTME: Cache mapping template names to compiled templates
// ABOUTME: Populated eagerly in one pass at startup, or left empty so every render compiles

use std::collections::HashMap;
use tracing::{error, info};

use super::compiled::CompiledTemplate;
use super::store::TemplateStore;

/// Read-mostly map from template name to compiled template.
///
/// Population needs `&mut self`, so it always happens before the cache is
/// shared with concurrent readers.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: HashMap<String, CompiledTemplate>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the cache from `store` when `use_cache` is set. A successful
    /// build replaces the whole map; a failed build leaves it empty.
    pub fn initialize(&mut self, store: &TemplateStore, use_cache: bool) {
        if !use_cache {
            info!("Template cache disabled, templates compile on every render");
            self.templates = HashMap::new();
            return;
        }

        match store.compile_all() {
            Ok(templates) => {
                info!(
                    "Cached {} template(s) from {}",
                    templates.len(),
                    store.location()
                );
                self.templates = templates;
            }
            Err(e) => {
                error!("Cannot create templates cache: {}", e);
                self.templates = HashMap::new();
            }
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&CompiledTemplate> {
        self.templates.get(name)
    }

    /// Cached template names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.templates.keys().map(|k| k.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
