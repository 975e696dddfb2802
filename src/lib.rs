//! SonataExtra - asset aggregation for Sonata admin pages
//!
//! Collects CSS and JS fragments per block while a page is built and
//! renders them as HTML, minifying inline code through a content cache.

pub mod assets;
pub mod cli;
pub mod config;
pub mod error;
pub mod ui;

pub use error::{SonataError, SonataResult};
