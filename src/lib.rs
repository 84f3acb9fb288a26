// ABOUTME: Main library module for the htmlrender page rendering layer
// ABOUTME: Exports the template store and cache, the rendering engine, and the CLI glue

pub mod cli;
pub mod handlers;
pub mod render;
pub mod template;

// Re-export commonly used types
pub use cli::{App, AppConfig, Args};
pub use handlers::{Pages, Renderer};
pub use render::{RenderEngine, RenderError, TemplateData};
pub use template::{CompiledTemplate, TemplateCache, TemplateError, TemplateStore, TemplatesConfig};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
