// ABOUTME: Home and about page handlers
// ABOUTME: Build each page's payload and hand it to the injected renderer

use std::io::Write;

use super::Renderer;
use crate::render::TemplateData;

pub const HOME_TEMPLATE: &str = "home.page.tmpl";
pub const ABOUT_TEMPLATE: &str = "about.page.tmpl";

pub struct Pages<R> {
    renderer: R,
}

impl<R: Renderer> Pages<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render the home page
    pub fn home(&self, sink: &mut dyn Write) {
        let data = TemplateData::new().with_string("title", "Home page");
        self.renderer.render_template(sink, HOME_TEMPLATE, &data);
    }

    /// Render the about page
    pub fn about(&self, sink: &mut dyn Write) {
        let data = TemplateData::new().with_string("title", "About");
        self.renderer.render_template(sink, ABOUT_TEMPLATE, &data);
    }
}

impl<R: Renderer> Renderer for &R {
    fn render_template(&self, sink: &mut dyn Write, name: &str, data: &TemplateData) {
        (**self).render_template(sink, name, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Records every call instead of rendering
    #[derive(Default)]
    struct RecordingRenderer {
        calls: Mutex<Vec<(String, TemplateData)>>,
    }

    impl Renderer for RecordingRenderer {
        fn render_template(&self, sink: &mut dyn Write, name: &str, data: &TemplateData) {
            self.calls
                .lock()
                .unwrap()
                .push((name.to_string(), data.clone()));
            sink.write_all(name.as_bytes()).unwrap();
        }
    }

    #[test]
    fn test_home_uses_home_template() {
        let pages = Pages::new(RecordingRenderer::default());
        let mut sink = Vec::new();
        pages.home(&mut sink);

        let calls = pages.renderer().calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, HOME_TEMPLATE);
        assert_eq!(calls[0].1.string_map["title"], "Home page");
        assert_eq!(sink, HOME_TEMPLATE.as_bytes());
    }

    #[test]
    fn test_about_uses_about_template() {
        let renderer = RecordingRenderer::default();
        let pages = Pages::new(&renderer);
        let mut sink = Vec::new();
        pages.about(&mut sink);

        let calls = renderer.calls.lock().unwrap();
        assert_eq!(calls[0].0, ABOUT_TEMPLATE);
        assert_eq!(calls[0].1.string_map["title"], "About");
    }
}
