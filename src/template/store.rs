// ABOUTME: Template store that compiles page fragments and composes them with layouts
// ABOUTME: Resolves template names to fragments, discovers layouts, and builds whole caches

use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use super::compiled::CompiledTemplate;
use super::config::TemplatesConfig;
use super::error::{Result, TemplateError};
use super::source::{DirSource, FragmentSource};

/// A layout fragment read from the backing store, ready to be registered.
#[derive(Debug, Clone)]
struct LayoutFragment {
    partial: String,
    file_name: String,
    source: String,
}

#[derive(Clone)]
pub struct TemplateStore {
    source: Arc<dyn FragmentSource>,
    page_suffix: String,
    layout_suffix: String,
    strict: bool,
}

impl TemplateStore {
    /// Create a store reading fragments from the configured directory
    pub fn from_config(config: &TemplatesConfig) -> Self {
        Self::with_source(Arc::new(DirSource::new(config.dir.clone())), config)
    }

    /// Create a store over any backing store, using the configured markers
    pub fn with_source(source: Arc<dyn FragmentSource>, config: &TemplatesConfig) -> Self {
        Self {
            source,
            page_suffix: config.page_suffix.clone(),
            layout_suffix: config.layout_suffix.clone(),
            strict: config.strict,
        }
    }

    pub fn location(&self) -> String {
        self.source.describe()
    }

    /// Compile the page fragment called `name` and merge the shared layouts into it
    pub fn compile_by_name(&self, name: &str) -> Result<CompiledTemplate> {
        validate_name(name)?;

        let source = self
            .source
            .read(name)
            .map_err(|e| TemplateError::unreadable(self.fragment_location(name), e))?;

        debug!("Parsing page fragment {}", name);
        let template = CompiledTemplate::page(name, &source, self.strict)?;

        self.compose_with_layouts(template)
    }

    /// Merge every layout fragment in the backing store into `template`.
    ///
    /// A failure to list layouts is treated as "no layouts": the page is
    /// returned as it is and the failure is only logged.
    pub fn compose_with_layouts(&self, template: CompiledTemplate) -> Result<CompiledTemplate> {
        let layouts = self.load_layouts()?;
        Self::attach(template, &layouts)
    }

    /// Enumerate the template names of every page fragment in the backing store
    pub fn discover_page_fragments(&self) -> Result<Vec<String>> {
        self.source
            .list(&self.page_suffix)
            .map_err(|e| TemplateError::unreadable(self.source.describe(), e))
    }

    /// Compile every page fragment. The first failure aborts the whole build
    /// and nothing compiled so far is returned.
    pub fn compile_all(&self) -> Result<HashMap<String, CompiledTemplate>> {
        let pages = self.discover_page_fragments()?;
        let layouts = self.load_layouts()?;

        let mut compiled = HashMap::with_capacity(pages.len());
        for name in pages {
            let source = self
                .source
                .read(&name)
                .map_err(|e| TemplateError::unreadable(self.fragment_location(&name), e))?;

            let template = CompiledTemplate::page(&name, &source, self.strict)?;
            let template = Self::attach(template, &layouts)?;

            debug!(
                "Compiled {} with {} layout(s)",
                name,
                template.layouts().len()
            );
            compiled.insert(name, template);
        }

        Ok(compiled)
    }

    fn load_layouts(&self) -> Result<Vec<LayoutFragment>> {
        let file_names = match self.source.list(&self.layout_suffix) {
            Ok(names) => names,
            Err(e) => {
                warn!(
                    "Cannot list layout fragments in {}, rendering without layouts: {}",
                    self.source.describe(),
                    e
                );
                return Ok(Vec::new());
            }
        };

        let mut layouts = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            let source = self
                .source
                .read(&file_name)
                .map_err(|e| TemplateError::unreadable(self.fragment_location(&file_name), e))?;

            let partial = file_name
                .strip_suffix(&self.layout_suffix)
                .unwrap_or(&file_name)
                .to_string();

            layouts.push(LayoutFragment {
                partial,
                file_name,
                source,
            });
        }

        Ok(layouts)
    }

    fn attach(template: CompiledTemplate, layouts: &[LayoutFragment]) -> Result<CompiledTemplate> {
        if layouts.is_empty() {
            return Ok(template);
        }

        template.with_layouts(
            layouts
                .iter()
                .map(|l| (l.partial.clone(), l.file_name.clone(), l.source.clone()))
                .collect(),
        )
    }

    fn fragment_location(&self, file_name: &str) -> String {
        format!("{}/{}", self.source.describe(), file_name)
    }
}

/// Template names map directly onto file names inside the store, so they
/// must not be able to climb out of it.
fn validate_name(name: &str) -> Result<()> {
    let invalid = name.is_empty()
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0')
        || name.split('.').all(|part| part.is_empty())
        || name.contains("..");

    if invalid {
        return Err(TemplateError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::source::MemorySource;
    use serde_json::json;
    use std::io;

    fn store(source: MemorySource) -> TemplateStore {
        TemplateStore::with_source(Arc::new(source), &TemplatesConfig::default())
    }

    /// Lists pages fine but fails to list layouts
    struct BrokenLayoutListing(MemorySource);

    impl FragmentSource for BrokenLayoutListing {
        fn read(&self, file_name: &str) -> io::Result<String> {
            self.0.read(file_name)
        }

        fn list(&self, suffix: &str) -> io::Result<Vec<String>> {
            if suffix.contains("layout") {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.0.list(suffix)
        }

        fn describe(&self) -> String {
            "<broken>".to_string()
        }
    }

    #[test]
    fn test_compile_by_name_without_layouts() {
        let store = store(MemorySource::new().with_fragment("home.page.tmpl", "<h1>{{title}}</h1>"));
        let template = store.compile_by_name("home.page.tmpl").unwrap();

        assert_eq!(template.name(), "home.page.tmpl");
        assert!(template.layouts().is_empty());
        assert_eq!(
            template.render_to_string(&json!({"title": "Home page"})).unwrap(),
            "<h1>Home page</h1>"
        );
    }

    #[test]
    fn test_compile_by_name_merges_every_layout() {
        let store = store(
            MemorySource::new()
                .with_fragment("home.page.tmpl", "{{#> base}}{{title}}{{/base}}")
                .with_fragment("base.layout.tmpl", "<main>{{> @partial-block}}{{> footer}}</main>")
                .with_fragment("footer.layout.tmpl", "<footer>f</footer>"),
        );

        let template = store.compile_by_name("home.page.tmpl").unwrap();

        assert_eq!(template.layouts(), ["base".to_string(), "footer".to_string()]);
        assert_eq!(
            template.render_to_string(&json!({"title": "Hi"})).unwrap(),
            "<main>Hi<footer>f</footer></main>"
        );
    }

    #[test]
    fn test_compile_by_name_missing_fragment() {
        let store = store(MemorySource::new());
        let err = store.compile_by_name("missing.page.tmpl").unwrap_err();

        assert!(matches!(err, TemplateError::BackingStoreUnreadable { .. }));
        assert_eq!(err.kind(), "BackingStoreUnreadable");
    }

    #[test]
    fn test_compile_by_name_rejects_escaping_names() {
        let store = store(MemorySource::new());

        for name in ["", "..", "../secret.page.tmpl", "a/b.page.tmpl", "a\\b", "..page.tmpl"] {
            let err = store.compile_by_name(name).unwrap_err();
            assert!(
                matches!(err, TemplateError::InvalidName { .. }),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[test]
    fn test_layout_listing_failure_degrades_to_no_layouts() {
        let source = MemorySource::new()
            .with_fragment("home.page.tmpl", "{{#> base}}plain{{/base}}")
            .with_fragment("base.layout.tmpl", "<div>{{> @partial-block}}</div>");
        let store = TemplateStore::with_source(
            Arc::new(BrokenLayoutListing(source)),
            &TemplatesConfig::default(),
        );

        let template = store.compile_by_name("home.page.tmpl").unwrap();

        assert!(template.layouts().is_empty());
        assert_eq!(template.render_to_string(&json!({})).unwrap(), "plain");
    }

    #[test]
    fn test_discover_page_fragments() {
        let store = store(
            MemorySource::new()
                .with_fragment("home.page.tmpl", "home")
                .with_fragment("about.page.tmpl", "about")
                .with_fragment("base.layout.tmpl", "base"),
        );

        assert_eq!(
            store.discover_page_fragments().unwrap(),
            vec!["about.page.tmpl", "home.page.tmpl"]
        );
    }

    #[test]
    fn test_compile_all_aborts_on_first_failure() {
        let store = store(
            MemorySource::new()
                .with_fragment("a.page.tmpl", "fine")
                .with_fragment("b.page.tmpl", "{{broken}")
                .with_fragment("c.page.tmpl", "fine"),
        );

        let err = store.compile_all().unwrap_err();
        assert!(matches!(err, TemplateError::ParseFailure { ref name, .. } if name == "b.page.tmpl"));
    }

    #[test]
    fn test_compile_all_keys_are_page_names() {
        let store = store(
            MemorySource::new()
                .with_fragment("home.page.tmpl", "home")
                .with_fragment("about.page.tmpl", "about")
                .with_fragment("base.layout.tmpl", "base"),
        );

        let compiled = store.compile_all().unwrap();
        let mut names: Vec<_> = compiled.keys().cloned().collect();
        names.sort();

        assert_eq!(names, vec!["about.page.tmpl", "home.page.tmpl"]);
        assert!(compiled.values().all(|t| t.layouts() == ["base".to_string()]));
    }
}
