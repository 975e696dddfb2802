//! HTML rendering of fragment blocks
//!
//! Output is raw concatenated markup for direct embedding in a template.
//! Paths and inline text are not escaped; callers must pass trusted strings.

use crate::assets::cache::{ContentCache, MinifyCache};
use crate::assets::minify::{CssMinifier, JsMinifier, Minify};
use crate::assets::store::{Fragment, FragmentStore, JsRef};
use crate::error::SonataResult;
use chrono::Duration;
use std::sync::Arc;
use tracing::debug;

/// Environment name in which inline JS is minified
pub const PRODUCTION_ENV: &str = "prod";

/// Renders blocks from a [`FragmentStore`]; shareable across requests
pub struct AssetRenderer {
    css_minifier: Box<dyn Minify>,
    js_minifier: Box<dyn Minify>,
    minify_cache: MinifyCache,
    environment: String,
}

impl AssetRenderer {
    /// Renderer with the bundled minifiers and a 24 hour cache TTL
    pub fn new(cache: Arc<dyn ContentCache>, environment: impl Into<String>) -> Self {
        Self {
            css_minifier: Box::new(CssMinifier::new()),
            js_minifier: Box::new(JsMinifier::new()),
            minify_cache: MinifyCache::new(cache),
            environment: environment.into(),
        }
    }

    pub fn with_minifiers(mut self, css: Box<dyn Minify>, js: Box<dyn Minify>) -> Self {
        self.css_minifier = css;
        self.js_minifier = js;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.minify_cache = self.minify_cache.with_ttl(ttl);
        self
    }

    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// Inline JS is only minified in the production environment
    pub fn should_minify_js(&self) -> bool {
        self.environment == PRODUCTION_ENV
    }

    pub fn blocks_css(&self, store: &FragmentStore, index: &str) -> String {
        store
            .css(index)
            .iter()
            .map(|path| format!("<link href=\"{}\" rel=\"stylesheet\">", path))
            .collect()
    }

    pub fn blocks_js(&self, store: &FragmentStore, index: &str) -> String {
        store
            .js(index)
            .iter()
            .map(|JsRef { path, defer }| {
                if *defer {
                    format!("<script src=\"{}\" defer></script>", path)
                } else {
                    format!("<script src=\"{}\"></script>", path)
                }
            })
            .collect()
    }

    /// All inline CSS of the block in one `<style>` tag
    ///
    /// With `compress`, the concatenated text is minified (through the
    /// cache) as a whole before being wrapped.
    pub fn blocks_css_inline(
        &self,
        store: &FragmentStore,
        index: &str,
        compress: bool,
    ) -> SonataResult<String> {
        let fragments = store.css_inline(index);
        if fragments.is_empty() {
            return Ok(String::new());
        }

        let mut content = fragments.concat();
        if compress {
            content = self
                .minify_cache
                .minify_and_cache(self.css_minifier.as_ref(), &content)?;
        }

        Ok(format!("<style>{}</style>", content))
    }

    /// All inline JS of the block in one `<script>` tag
    ///
    /// `compress` only takes effect in the production environment.
    pub fn blocks_js_inline(
        &self,
        store: &FragmentStore,
        index: &str,
        compress: bool,
    ) -> SonataResult<String> {
        let fragments = store.js_inline(index);
        if fragments.is_empty() {
            return Ok(String::new());
        }

        let mut content = fragments.concat();
        if compress {
            if self.should_minify_js() {
                content = self
                    .minify_cache
                    .minify_and_cache(self.js_minifier.as_ref(), &content)?;
            } else {
                debug!(
                    "Skipping inline JS minification in {} environment",
                    self.environment
                );
            }
        }

        Ok(format!("<script>{}</script>", content))
    }
}

/// Per-request asset aggregator
///
/// Owns the fragments added while handling one request and renders them
/// through a shared [`AssetRenderer`].
pub struct AssetsHandler {
    store: FragmentStore,
    renderer: Arc<AssetRenderer>,
}

impl AssetsHandler {
    pub fn new(renderer: Arc<AssetRenderer>) -> Self {
        Self::with_store(FragmentStore::new(), renderer)
    }

    pub fn with_store(store: FragmentStore, renderer: Arc<AssetRenderer>) -> Self {
        Self { store, renderer }
    }

    pub fn store(&self) -> &FragmentStore {
        &self.store
    }

    pub fn push(&mut self, index: &str, fragment: Fragment) -> &mut Self {
        self.store.push(index, fragment);
        self
    }

    pub fn add_css(&mut self, path: impl Into<String>, index: &str) -> &mut Self {
        self.store.add_css(path, index);
        self
    }

    pub fn add_css_inline(&mut self, text: impl Into<String>, index: &str) -> &mut Self {
        self.store.add_css_inline(text, index);
        self
    }

    pub fn add_js(&mut self, path: impl Into<String>, defer: bool, index: &str) -> &mut Self {
        self.store.add_js(path, defer, index);
        self
    }

    pub fn add_js_inline(&mut self, text: impl Into<String>, index: &str) -> &mut Self {
        self.store.add_js_inline(text, index);
        self
    }

    pub fn css(&self, index: &str) -> &[String] {
        self.store.css(index)
    }

    pub fn css_inline(&self, index: &str) -> &[String] {
        self.store.css_inline(index)
    }

    pub fn js(&self, index: &str) -> &[JsRef] {
        self.store.js(index)
    }

    pub fn js_inline(&self, index: &str) -> &[String] {
        self.store.js_inline(index)
    }

    pub fn blocks_css(&self, index: &str) -> String {
        self.renderer.blocks_css(&self.store, index)
    }

    pub fn blocks_js(&self, index: &str) -> String {
        self.renderer.blocks_js(&self.store, index)
    }

    pub fn blocks_css_inline(&self, index: &str, compress: bool) -> SonataResult<String> {
        self.renderer.blocks_css_inline(&self.store, index, compress)
    }

    pub fn blocks_js_inline(&self, index: &str, compress: bool) -> SonataResult<String> {
        self.renderer.blocks_js_inline(&self.store, index, compress)
    }
}
