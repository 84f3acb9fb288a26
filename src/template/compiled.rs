// ABOUTME: Compiled template produced from one page fragment plus shared layouts
// ABOUTME: Wraps an immutable Handlebars registry whose entry point is the page itself

use handlebars::Handlebars;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use tracing::warn;

use super::error::{Result, TemplateError};

/// An executable page. Layouts are registered as partials next to the page,
/// so the page can wrap itself in `{{#> layout}}...{{/layout}}`.
///
/// There is no way to mutate a `CompiledTemplate` once the store has built
/// it; picking up source changes means compiling again.
#[derive(Clone)]
pub struct CompiledTemplate {
    name: String,
    layouts: Vec<String>,
    registry: Handlebars<'static>,
}

impl CompiledTemplate {
    /// Parse a page fragment and register it under `name`
    pub(crate) fn page(name: &str, source: &str, strict: bool) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(strict);
        registry.set_dev_mode(false);

        registry
            .register_template_string(name, source)
            .map_err(|e| TemplateError::parse(name, e))?;

        Ok(Self {
            name: name.to_string(),
            layouts: Vec::new(),
            registry,
        })
    }

    /// Merge layout fragments into the page's namespace. Each entry is
    /// `(partial name, fragment file name, source)`.
    pub(crate) fn with_layouts(mut self, layouts: Vec<(String, String, String)>) -> Result<Self> {
        for (partial, file_name, source) in layouts {
            // partials share the template namespace; never replace the entry point
            if partial == self.name {
                warn!(
                    "Skipping layout {} for {}: its partial name clashes with the page",
                    file_name, self.name
                );
                continue;
            }
            self.registry
                .register_partial(&partial, source)
                .map_err(|e| TemplateError::parse(file_name, e))?;
            self.layouts.push(partial);
        }
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Partial names of the layouts merged into this template
    pub fn layouts(&self) -> &[String] {
        &self.layouts
    }

    /// Execute the page against `data`, writing the output to `out`
    pub fn execute<T, W>(&self, data: &T, out: W) -> std::result::Result<(), handlebars::RenderError>
    where
        T: Serialize,
        W: Write,
    {
        self.registry.render_to_write(&self.name, data, out)
    }

    /// Execute the page into a fresh string
    pub fn render_to_string<T: Serialize>(
        &self,
        data: &T,
    ) -> std::result::Result<String, handlebars::RenderError> {
        self.registry.render(&self.name, data)
    }
}

impl fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("name", &self.name)
            .field("layouts", &self.layouts)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_page_renders_without_layouts() {
        let template = CompiledTemplate::page("home.page.tmpl", "<h1>{{title}}</h1>", true).unwrap();
        let output = template.render_to_string(&json!({"title": "Home"})).unwrap();

        assert_eq!(output, "<h1>Home</h1>");
        assert_eq!(template.name(), "home.page.tmpl");
        assert!(template.layouts().is_empty());
    }

    #[test]
    fn test_page_parse_failure() {
        let err = CompiledTemplate::page("broken.page.tmpl", "{{title}", true)
            .unwrap_err();

        assert!(matches!(err, TemplateError::ParseFailure { ref name, .. } if name == "broken.page.tmpl"));
    }

    #[test]
    fn test_layout_wraps_page() {
        let template = CompiledTemplate::page(
            "home.page.tmpl",
            "{{#> main}}<p>{{title}}</p>{{/main}}",
            true,
        )
        .unwrap()
        .with_layouts(vec![(
            "main".to_string(),
            "main.layout.tmpl".to_string(),
            "<body>{{> @partial-block}}</body>".to_string(),
        )])
        .unwrap();

        let output = template.render_to_string(&json!({"title": "Home"})).unwrap();
        assert_eq!(output, "<body><p>Home</p></body>");
        assert_eq!(template.layouts(), ["main".to_string()]);
    }

    #[test]
    fn test_layout_parse_failure_names_layout_file() {
        let err = CompiledTemplate::page("home.page.tmpl", "home", true)
            .unwrap()
            .with_layouts(vec![(
                "main".to_string(),
                "main.layout.tmpl".to_string(),
                "<body>{{title}</body>".to_string(),
            )])
            .unwrap_err();

        assert!(matches!(err, TemplateError::ParseFailure { ref name, .. } if name == "main.layout.tmpl"));
    }

    #[test]
    fn test_layout_named_like_page_is_skipped() {
        let template = CompiledTemplate::page("home.page.tmpl", "<p>{{title}}</p>", true)
            .unwrap()
            .with_layouts(vec![(
                "home.page.tmpl".to_string(),
                "home.page.tmpl.layout.tmpl".to_string(),
                "<div>layout</div>".to_string(),
            )])
            .unwrap();

        assert!(template.layouts().is_empty());
        assert_eq!(
            template.render_to_string(&json!({"title": "Home"})).unwrap(),
            "<p>Home</p>"
        );
    }

    #[test]
    fn test_strict_mode_rejects_missing_field() {
        let strict = CompiledTemplate::page("p.page.tmpl", "{{missing}}", true).unwrap();
        assert!(strict.render_to_string(&json!({})).is_err());

        let lenient = CompiledTemplate::page("p.page.tmpl", "[{{missing}}]", false).unwrap();
        assert_eq!(lenient.render_to_string(&json!({})).unwrap(), "[]");
    }

    #[test]
    fn test_output_is_html_escaped() {
        let template = CompiledTemplate::page("p.page.tmpl", "{{title}}", true).unwrap();
        let output = template
            .render_to_string(&json!({"title": "<b>bold</b>"}))
            .unwrap();

        assert_eq!(output, "&lt;b&gt;bold&lt;/b&gt;");
    }
}
