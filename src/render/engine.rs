// ABOUTME: Rendering engine that turns a template name and payload into bytes on a sink
// ABOUTME: Resolves through the cache with an on-demand compile fallback, then buffers and writes

use std::borrow::Cow;
use std::io::Write;
use tracing::{debug, error, info, warn};

use super::defaults::{DefaultData, NoDefaults};
use super::error::{RenderError, Result};
use super::payload::TemplateData;
use crate::handlers::Renderer;
use crate::template::{self, CompiledTemplate, TemplateCache, TemplateStore, TemplatesConfig};

pub struct RenderEngine {
    store: TemplateStore,
    cache: TemplateCache,
    use_cache: bool,
    defaults: Box<dyn DefaultData>,
}

impl RenderEngine {
    /// Create an engine over the configured templates directory
    pub fn new(config: &TemplatesConfig, use_cache: bool) -> Self {
        Self::with_store(TemplateStore::from_config(config), use_cache)
    }

    /// Create an engine over an existing store and initialize its cache
    pub fn with_store(store: TemplateStore, use_cache: bool) -> Self {
        let mut engine = Self {
            store,
            cache: TemplateCache::new(),
            use_cache,
            defaults: Box::new(NoDefaults),
        };
        engine.rebuild_cache();
        engine
    }

    /// Install the hook that merges default data into every payload
    pub fn with_defaults<D>(mut self, defaults: D) -> Self
    where
        D: DefaultData + 'static,
    {
        self.defaults = Box::new(defaults);
        self
    }

    /// Recompile every page into a fresh cache, replacing the old one
    pub fn rebuild_cache(&mut self) {
        self.cache.initialize(&self.store, self.use_cache);
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn store(&self) -> &TemplateStore {
        &self.store
    }

    /// Find the compiled template for `name`. A cache miss compiles from
    /// source for this call only; the result is never stored in the cache.
    pub fn resolve(&self, name: &str) -> template::Result<Cow<'_, CompiledTemplate>> {
        if let Some(template) = self.cache.lookup(name) {
            return Ok(Cow::Borrowed(template));
        }

        if self.use_cache {
            warn!("Template {} not found in cache", name);
        } else {
            debug!("Compiling template {} from source", name);
        }

        self.store.compile_by_name(name).map(Cow::Owned)
    }

    /// Render `name` with `data` into `sink`, returning the number of bytes
    /// written. Execution goes to a buffer first, so an execution failure
    /// leaves the sink untouched.
    pub fn try_render<W>(&self, sink: &mut W, name: &str, data: &TemplateData) -> Result<usize>
    where
        W: Write + ?Sized,
    {
        let template = self.resolve(name)?;
        let payload = self.defaults.merge(data);

        let mut buf = Vec::new();
        template
            .execute(&*payload, &mut buf)
            .map_err(|e| RenderError::ExecutionFailure {
                name: name.to_string(),
                source: Box::new(e),
            })?;

        sink.write_all(&buf)
            .and_then(|_| sink.flush())
            .map_err(|e| RenderError::WriteFailure {
                name: name.to_string(),
                source: e,
            })?;

        info!(
            "Written {} bytes while writing rendered template {}",
            buf.len(),
            name
        );
        Ok(buf.len())
    }
}

impl Renderer for RenderEngine {
    fn render_template(&self, sink: &mut dyn Write, name: &str, data: &TemplateData) {
        if let Err(e) = self.try_render(sink, name, data) {
            error!("[{}] Rendering template {} failed: {}", e.kind(), name, e);
        }
    }
}
