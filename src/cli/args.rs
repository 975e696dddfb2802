//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// SonataExtra - asset aggregation for Sonata admin pages
///
/// Renders CSS and JS blocks described in an asset manifest, minifying
/// inline fragments through a content cache.
#[derive(Parser, Debug)]
#[command(name = "sonata-extra")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "SONATA_EXTRA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Runtime environment, overrides general.environment
    #[arg(long, global = true, env = "SONATA_EXTRA_ENV")]
    pub env: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render asset blocks from a manifest as HTML
    Render(RenderArgs),

    /// Manage the minification cache
    Cache(CacheArgs),

    /// Show or initialize configuration
    Config(ConfigArgs),
}

/// Part of a block to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AssetPart {
    /// <link> tags for stylesheet references
    Css,
    /// <style> tag with inline CSS
    CssInline,
    /// <script src> tags
    Js,
    /// <script> tag with inline JS
    JsInline,
}

impl AssetPart {
    /// Render order used when no part is requested
    pub fn all() -> &'static [Self] {
        &[Self::Css, Self::CssInline, Self::Js, Self::JsInline]
    }
}

/// Arguments for the render command
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Asset manifest (TOML)
    pub manifest: PathBuf,

    /// Blocks to render (defaults to every block in the manifest)
    #[arg(short, long)]
    pub block: Vec<String>,

    /// Parts to render (defaults to all, in css, css-inline, js, js-inline order)
    #[arg(short, long, value_delimiter = ',')]
    pub part: Vec<AssetPart>,

    /// Minify inline fragments
    #[arg(long)]
    pub compress: bool,
}

/// Arguments for the cache command
#[derive(Parser, Debug)]
pub struct CacheArgs {
    /// Subcommand for cache
    #[command(subcommand)]
    pub action: CacheAction,
}

/// Cache subcommands
#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show the cache directory
    Path,

    /// Remove expired entries
    Prune,

    /// Remove all entries
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_render() {
        let cli = Cli::parse_from([
            "sonata-extra",
            "render",
            "assets.toml",
            "--block",
            "header",
            "--part",
            "css,js-inline",
            "--compress",
        ]);
        match cli.command {
            Commands::Render(args) => {
                assert_eq!(args.manifest, PathBuf::from("assets.toml"));
                assert_eq!(args.block, vec!["header"]);
                assert_eq!(args.part, vec![AssetPart::Css, AssetPart::JsInline]);
                assert!(args.compress);
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn cli_render_defaults() {
        let cli = Cli::parse_from(["sonata-extra", "render", "assets.toml"]);
        match cli.command {
            Commands::Render(args) => {
                assert!(args.block.is_empty());
                assert!(args.part.is_empty());
                assert!(!args.compress);
            }
            _ => panic!("expected Render command"),
        }
    }

    #[test]
    fn cli_parses_cache_clear() {
        let cli = Cli::parse_from(["sonata-extra", "cache", "clear", "--yes"]);
        match cli.command {
            Commands::Cache(CacheArgs {
                action: CacheAction::Clear { yes },
            }) => assert!(yes),
            _ => panic!("expected Cache clear command"),
        }
    }

    #[test]
    fn cli_global_env_flag() {
        let cli = Cli::parse_from(["sonata-extra", "render", "a.toml", "--env", "prod"]);
        assert_eq!(cli.env.as_deref(), Some("prod"));
    }

    #[test]
    fn cli_verbose_levels() {
        let cli = Cli::parse_from(["sonata-extra", "cache", "path"]);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::parse_from(["sonata-extra", "-vv", "cache", "path"]);
        assert_eq!(cli.verbose, 2);
    }
}
