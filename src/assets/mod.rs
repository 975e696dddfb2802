//! Asset aggregation for admin pages
//!
//! Producers register CSS and JS fragments under a block index while a page
//! or command runs; the renderer turns each block into HTML tags at output
//! time.
//!
//! # Inline minification
//!
//! | Kind | `compress = true` | Gate |
//! |------|-------------------|------|
//! | CSS inline | minified, cached | none |
//! | JS inline | minified, cached | environment is `prod` |
//!
//! Minified output is memoized in a [`ContentCache`] keyed by a digest of
//! the concatenated source, for 24 hours by default.

pub mod cache;
pub mod manifest;
pub mod minify;
pub mod render;
pub mod store;

pub use cache::{CacheEntry, ContentCache, FileCache, MemoryCache, MinifyCache};
pub use manifest::AssetManifest;
pub use minify::{CssMinifier, JsMinifier, Minify};
pub use render::{AssetRenderer, AssetsHandler, PRODUCTION_ENV};
pub use store::{Fragment, FragmentStore, JsRef, DEFAULT_BLOCK};
