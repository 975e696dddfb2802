//! Per-request fragment store
//!
//! Fragments are grouped by block index and kept in insertion order.
//! Nothing is ever removed or reordered once added.

use std::collections::HashMap;

/// Block index used when the caller has no preference
pub const DEFAULT_BLOCK: &str = "default";

/// External script reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsRef {
    pub path: String,
    pub defer: bool,
}

/// A single CSS or JS fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    /// Stylesheet referenced by URL
    CssRef(String),
    /// Literal CSS text
    CssInline(String),
    /// Script referenced by URL
    JsRef(JsRef),
    /// Literal JS text
    JsInline(String),
}

#[derive(Debug, Default)]
struct Block {
    css: Vec<String>,
    css_inline: Vec<String>,
    js: Vec<JsRef>,
    js_inline: Vec<String>,
}

/// Fragments collected while a page or command runs
#[derive(Debug, Default)]
pub struct FragmentStore {
    blocks: HashMap<String, Block>,
    order: Vec<String>,
}

impl FragmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to the block named `index`
    pub fn push(&mut self, index: &str, fragment: Fragment) -> &mut Self {
        if !self.blocks.contains_key(index) {
            self.order.push(index.to_string());
        }
        let block = self.blocks.entry(index.to_string()).or_default();

        match fragment {
            Fragment::CssRef(path) => block.css.push(path),
            Fragment::CssInline(text) => block.css_inline.push(text),
            Fragment::JsRef(js) => block.js.push(js),
            Fragment::JsInline(text) => block.js_inline.push(text),
        }

        self
    }

    pub fn add_css(&mut self, path: impl Into<String>, index: &str) -> &mut Self {
        self.push(index, Fragment::CssRef(path.into()))
    }

    pub fn add_css_inline(&mut self, text: impl Into<String>, index: &str) -> &mut Self {
        self.push(index, Fragment::CssInline(text.into()))
    }

    pub fn add_js(&mut self, path: impl Into<String>, defer: bool, index: &str) -> &mut Self {
        self.push(
            index,
            Fragment::JsRef(JsRef {
                path: path.into(),
                defer,
            }),
        )
    }

    pub fn add_js_inline(&mut self, text: impl Into<String>, index: &str) -> &mut Self {
        self.push(index, Fragment::JsInline(text.into()))
    }

    /// Stylesheet references for `index`, empty if never populated
    pub fn css(&self, index: &str) -> &[String] {
        self.blocks.get(index).map(|b| b.css.as_slice()).unwrap_or(&[])
    }

    pub fn css_inline(&self, index: &str) -> &[String] {
        self.blocks.get(index).map(|b| b.css_inline.as_slice()).unwrap_or(&[])
    }

    pub fn js(&self, index: &str) -> &[JsRef] {
        self.blocks.get(index).map(|b| b.js.as_slice()).unwrap_or(&[])
    }

    pub fn js_inline(&self, index: &str) -> &[String] {
        self.blocks.get(index).map(|b| b.js_inline.as_slice()).unwrap_or(&[])
    }

    /// Block indices in the order they were first populated
    pub fn indices(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
