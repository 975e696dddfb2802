//! Minifiers for inline CSS and JavaScript
//!
//! Each minifier takes raw source text and returns a compact equivalent.
//! Malformed input is reported as [`SonataError::Minify`] and never
//! recovered from locally.

use crate::error::{SonataError, SonataResult};
use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc_allocator::Allocator;
use oxc_codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc_mangler::MangleOptions;
use oxc_minifier::{CompressOptions, Minifier, MinifierOptions};
use oxc_parser::Parser;
use oxc_span::SourceType;

/// A minifier for one asset language
pub trait Minify: Send + Sync {
    /// Short name of the language, also used to scope cache keys
    fn name(&self) -> &str;

    /// Produce the minified form of `source`
    fn minify(&self, source: &str) -> SonataResult<String>;
}

/// CSS minifier backed by lightningcss
#[derive(Debug, Default, Clone, Copy)]
pub struct CssMinifier;

impl CssMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl Minify for CssMinifier {
    fn name(&self) -> &str {
        "css"
    }

    fn minify(&self, source: &str) -> SonataResult<String> {
        let sheet = StyleSheet::parse(source, ParserOptions::default())
            .map_err(|e| SonataError::minify("css", e.to_string()))?;

        let printed = sheet
            .to_css(PrinterOptions {
                minify: true,
                ..PrinterOptions::default()
            })
            .map_err(|e| SonataError::minify("css", e.to_string()))?;

        Ok(printed.code)
    }
}

/// JavaScript minifier backed by oxc (compress, mangle, no comments)
#[derive(Debug, Default, Clone, Copy)]
pub struct JsMinifier;

impl JsMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl Minify for JsMinifier {
    fn name(&self) -> &str {
        "js"
    }

    fn minify(&self, source: &str) -> SonataResult<String> {
        let allocator = Allocator::default();
        let parse_result = Parser::new(&allocator, source, SourceType::default()).parse();

        if parse_result.panicked || !parse_result.errors.is_empty() {
            let reason = parse_result
                .errors
                .first()
                .map(|e| format!("{:?}", e))
                .unwrap_or_else(|| "parser aborted".to_string());
            return Err(SonataError::minify("js", reason));
        }

        let mut program = parse_result.program;

        let options = MinifierOptions {
            mangle: Some(MangleOptions::default()),
            compress: Some(CompressOptions::smallest()),
        };
        let minified = Minifier::new(options).minify(&allocator, &mut program);

        let codegen_options = CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        };

        let generated = Codegen::new()
            .with_options(codegen_options)
            .with_scoping(minified.scoping)
            .build(&program);

        Ok(generated.code)
    }
}
