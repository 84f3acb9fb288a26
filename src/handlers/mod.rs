// ABOUTME: Page handlers written against a render-by-name capability
// ABOUTME: Defines the Renderer trait and the home and about pages that use it

pub mod pages;

use std::io::Write;

use crate::render::TemplateData;

/// Anything that can render a named template with a payload into a sink.
///
/// Failures are handled (logged) by the implementation; callers must not
/// assume any bytes were written.
pub trait Renderer: Send + Sync {
    fn render_template(&self, sink: &mut dyn Write, name: &str, data: &TemplateData);
}

pub use pages::Pages;
