// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides a temporary templates directory with page and layout fragment writers

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use htmlrender::render::RenderEngine;
use htmlrender::template::TemplatesConfig;

pub const HOME_PAGE: &str = "<h1>{{string_map.title}}</h1>";
pub const HOME_PAGE_WITH_LAYOUT: &str = "{{#> main}}<h1>{{string_map.title}}</h1>{{/main}}";
pub const MAIN_LAYOUT: &str = "<html><body>{{> @partial-block}}</body></html>";

pub struct TestTemplates {
    pub temp_dir: TempDir,
}

impl TestTemplates {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn file(&self, file_name: &str) -> PathBuf {
        self.path().join(file_name)
    }

    pub fn with_page(self, name: &str, source: &str) -> Self {
        self.write(&format!("{}.page.tmpl", name), source);
        self
    }

    pub fn with_layout(self, name: &str, source: &str) -> Self {
        self.write(&format!("{}.layout.tmpl", name), source);
        self
    }

    pub fn write(&self, file_name: &str, source: &str) {
        fs::write(self.file(file_name), source).expect("Failed to write fragment");
    }

    pub fn remove(&self, file_name: &str) {
        fs::remove_file(self.file(file_name)).expect("Failed to remove fragment");
    }

    pub fn config(&self) -> TemplatesConfig {
        TemplatesConfig::with_dir(self.path())
    }

    pub fn engine(&self, use_cache: bool) -> RenderEngine {
        RenderEngine::new(&self.config(), use_cache)
    }
}

/// Render through the engine and return the sink contents as a string
pub fn render(engine: &RenderEngine, name: &str, data: &htmlrender::TemplateData) -> String {
    let mut sink = Vec::new();
    engine
        .try_render(&mut sink, name, data)
        .expect("render failed");
    String::from_utf8(sink).expect("output is not UTF-8")
}
