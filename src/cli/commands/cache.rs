//! Cache command - manage the minification cache

use crate::assets::FileCache;
use crate::cli::args::{CacheAction, CacheArgs};
use crate::config::{CacheBackend, Config, ConfigManager};
use crate::error::SonataResult;
use crate::ui::{self, UiContext};
use std::path::Path;

/// Execute the cache command
pub async fn execute(args: CacheArgs, config: &Config) -> SonataResult<()> {
    let dir = ConfigManager::cache_dir(config);
    let ctx = UiContext::detect();

    match args.action {
        CacheAction::Path => {
            println!("{}", dir.display());
        }
        CacheAction::Prune => {
            let Some(cache) = open_file_cache(&ctx, config, &dir)? else {
                return Ok(());
            };

            let removed = cache.prune()?;
            ui::step_ok_detail(
                &ctx,
                &format!("Pruned {} expired entr{}", removed, plural(removed)),
                &dir.display().to_string(),
            );
        }
        CacheAction::Clear { yes } => {
            let Some(cache) = open_file_cache(&ctx, config, &dir)? else {
                return Ok(());
            };

            let count = cache.len()?;
            if count == 0 {
                ui::step_info(&ctx, "Cache is already empty");
                return Ok(());
            }

            let ctx = ctx.with_auto_yes(yes);
            let prompt = format!("Remove {} cached entr{}?", count, plural(count));
            if !ui::confirm(&ctx, &prompt, false).await? {
                ui::step_warn_hint(&ctx, "Aborted", "Use --yes to skip confirmation");
                return Ok(());
            }

            let removed = cache.clear()?;
            ui::step_ok(
                &ctx,
                &format!("Cleared {} entr{}", removed, plural(removed)),
            );
        }
    }

    Ok(())
}

/// On-disk cache, or `None` with a warning when the memory backend is configured
fn open_file_cache(
    ctx: &UiContext,
    config: &Config,
    dir: &Path,
) -> SonataResult<Option<FileCache>> {
    if config.cache.backend == CacheBackend::Memory {
        ui::step_warn_hint(
            ctx,
            "Cache backend is memory, nothing is kept on disk",
            "Set cache.backend = \"file\" to persist minified output",
        );
        return Ok(None);
    }

    FileCache::open(dir).map(Some)
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        "y"
    } else {
        "ies"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_backend_has_no_file_cache() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut config = Config::default();
        config.cache.backend = CacheBackend::Memory;

        let dir = temp.path().join("cache");
        let cache = open_file_cache(&UiContext::non_interactive(), &config, &dir).unwrap();
        assert!(cache.is_none());
        assert!(!dir.exists());
    }

    #[test]
    fn file_backend_opens_cache_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let dir = temp.path().join("cache");

        let ctx = UiContext::non_interactive();
        let cache = open_file_cache(&ctx, &Config::default(), &dir).unwrap();
        assert!(cache.is_some());
        assert!(dir.is_dir());
    }

    #[test]
    fn entry_pluralization() {
        assert_eq!(plural(1), "y");
        assert_eq!(plural(0), "ies");
        assert_eq!(plural(3), "ies");
    }
}
