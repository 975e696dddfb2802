//! Confirmation prompt with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{SonataError, SonataResult};

/// Ask for confirmation; `default` is used when nobody can answer
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> SonataResult<bool> {
    if ctx.auto_yes() {
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    // cliclack blocks on stdin
    let message = message.to_string();
    let result = tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| SonataError::Internal(format!("prompt task failed: {}", e)))?;

    result.map_err(|e| SonataError::User(format!("Prompt failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn auto_yes_skips_prompt() {
        let ctx = UiContext::non_interactive().with_auto_yes(true);
        assert!(confirm(&ctx, "Clear?", false).await.unwrap());
    }

    #[tokio::test]
    async fn non_interactive_uses_default() {
        let ctx = UiContext::non_interactive();
        assert!(!confirm(&ctx, "Clear?", false).await.unwrap());
    }
}
