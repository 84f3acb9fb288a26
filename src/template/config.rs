// ABOUTME: Configuration for locating and compiling template fragments
// ABOUTME: Defines the templates directory, fragment markers, and strictness of rendering

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TEMPLATES_DIR: &str = "./templates";
pub const DEFAULT_PAGE_SUFFIX: &str = ".page.tmpl";
pub const DEFAULT_LAYOUT_SUFFIX: &str = ".layout.tmpl";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory holding page and layout fragments
    pub dir: PathBuf,

    /// File name ending that marks a page fragment
    pub page_suffix: String,

    /// File name ending that marks a shared layout fragment
    pub layout_suffix: String,

    /// Fail execution when a template references a field the payload lacks
    pub strict: bool,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            page_suffix: DEFAULT_PAGE_SUFFIX.to_string(),
            layout_suffix: DEFAULT_LAYOUT_SUFFIX.to_string(),
            strict: true,
        }
    }
}

impl TemplatesConfig {
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }
}
