// ABOUTME: Render entry point combining the registry, the template cache and the engine
// ABOUTME: Turns a template identifier plus context into rendered text or a typed error

use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

use super::cache::TemplateCache;
use super::engine::TemplateEngine;
use super::error::Result;
use super::parser::Template;
use super::registry::TemplateRegistry;
use super::value::Context;

/// Renders registered templates from a template directory.
///
/// Clones share one cache, so a renderer can be handed to many threads.
#[derive(Debug, Clone)]
pub struct Renderer {
    cache: Arc<TemplateCache>,
    registry: TemplateRegistry,
    engine: TemplateEngine,
}

impl Renderer {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_cache(Arc::new(TemplateCache::new(base_dir)))
    }

    pub fn with_cache(cache: Arc<TemplateCache>) -> Self {
        Self {
            cache,
            registry: TemplateRegistry::new(),
            engine: TemplateEngine::new(),
        }
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Render the template registered as `template_id`
    pub fn render(&self, template_id: &str, context: &Context) -> Result<String> {
        let template = self.load(template_id)?;
        self.engine.render(&template, context)
    }

    /// Render inline template text, bypassing the registry and the cache
    pub fn render_str(&self, template: &str, context: &Context) -> Result<String> {
        self.engine.render_template(template, context)
    }

    /// Render, turning any failure into a visible error fragment
    pub fn render_or_fallback(&self, template_id: &str, context: &Context) -> String {
        match self.render(template_id, context) {
            Ok(html) => html,
            Err(e) => {
                // `render` already warned about an unknown id
                let path = self
                    .registry
                    .lookup(template_id)
                    .unwrap_or_else(|| self.registry.default_path());
                error!("Template rendering error for '{}': {}", template_id, e);
                format!(
                    "<div class=\"error\">Template rendering failed: {}</div>",
                    path.display()
                )
            }
        }
    }

    /// Load and parse the template registered as `template_id`
    pub fn load(&self, template_id: &str) -> Result<Template> {
        let path = self.registry.resolve(template_id);
        let text = self.cache.get(path)?;
        Template::parse(&text)
    }

    /// Forget every cached template so edits on disk are picked up
    pub fn invalidate_template_cache(&self) {
        self.cache.invalidate();
    }
}
