// ABOUTME: Rendering engine module for turning template names into HTML output
// ABOUTME: Exports the engine, the per-request payload, and the default data hook

pub mod defaults;
pub mod engine;
pub mod error;
pub mod payload;

pub use defaults::{DefaultData, NoDefaults, StaticDefaults};
pub use engine::RenderEngine;
pub use error::{RenderError, Result};
pub use payload::TemplateData;
