//! Terminal output for maintenance commands
//!
//! Uses `cliclack` when attached to a terminal and plain `[OK]`/`[WARN]`
//! lines otherwise, so output stays greppable in CI and scripts. Rendered
//! HTML never goes through this module; it is written to stdout untouched.

mod context;
mod output;
mod prompts;

pub use context::UiContext;
pub use output::{step_info, step_ok, step_ok_detail, step_warn_hint};
pub use prompts::confirm;
