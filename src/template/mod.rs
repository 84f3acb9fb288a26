// ABOUTME: Template store and cache for page rendering
// ABOUTME: Compiles page fragments with shared layouts and caches the compiled results

pub mod cache;
pub mod compiled;
pub mod config;
pub mod error;
pub mod source;
pub mod store;

pub use cache::TemplateCache;
pub use compiled::CompiledTemplate;
pub use config::TemplatesConfig;
pub use error::{Result, TemplateError};
pub use source::{DirSource, FragmentSource, MemorySource};
pub use store::TemplateStore;
