//! Render command - print asset blocks from a manifest as HTML

use crate::assets::{AssetManifest, AssetsHandler};
use crate::cli::args::{AssetPart, RenderArgs};
use crate::config::{self, Config};
use crate::error::{SonataError, SonataResult};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::debug;

/// Execute the render command
pub async fn execute(args: RenderArgs, config: &Config) -> SonataResult<()> {
    let manifest = AssetManifest::load(&args.manifest).await?;
    let renderer = Arc::new(config::build_renderer(config)?);
    let assets = AssetsHandler::with_store(manifest.into_store(), renderer);

    let compress = args.compress || config.assets.compress;
    let html = render_blocks(&assets, &args.block, &args.part, compress)?;

    let mut stdout = io::stdout().lock();
    stdout
        .write_all(html.as_bytes())
        .and_then(|_| stdout.flush())
        .map_err(|e| SonataError::io("writing rendered HTML", e))?;

    Ok(())
}

/// Render the requested blocks, one non-empty part per line
///
/// Empty `blocks` means every block in first-insertion order, empty
/// `parts` means all four parts. Unknown blocks render nothing.
pub fn render_blocks(
    assets: &AssetsHandler,
    blocks: &[String],
    parts: &[AssetPart],
    compress: bool,
) -> SonataResult<String> {
    let indices: Vec<String> = if blocks.is_empty() {
        assets.store().indices().map(str::to_string).collect()
    } else {
        blocks.to_vec()
    };
    let parts = if parts.is_empty() {
        AssetPart::all()
    } else {
        parts
    };

    let mut output = String::new();
    for index in &indices {
        debug!("Rendering block {}", index);
        for part in parts {
            let html = match part {
                AssetPart::Css => assets.blocks_css(index),
                AssetPart::CssInline => assets.blocks_css_inline(index, compress)?,
                AssetPart::Js => assets.blocks_js(index),
                AssetPart::JsInline => assets.blocks_js_inline(index, compress)?,
            };
            if !html.is_empty() {
                output.push_str(&html);
                output.push('\n');
            }
        }
    }

    Ok(output)
}
