//! CLI command implementations
//!
//! Each command is in its own submodule.

pub mod fix;
pub mod show;

pub use fix::{execute_fix, unified_diff, FixOptions};
pub use show::{execute_show_config, execute_tags};
