//! Show commands
//!
//! `show-config` prints the resolved rule configuration; `tags` lists the
//! annotation names accepted in a configuration.

use std::path::Path;

use anyhow::Result;
use console::style;

use crate::config::Config;
use crate::tags::ALLOWED_TAGS;

/// Print the resolved rule configuration as JSON
pub fn execute_show_config(config: Config, base_dir: &Path) -> Result<()> {
    let header = config.resolve(base_dir)?;
    let json = header.to_rule_json()?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

/// Print the allowed annotation names
pub fn execute_tags() -> Result<()> {
    println!("{}", style("Allowed annotations:").bold());
    for tag in ALLOWED_TAGS {
        println!("  {} @{}", style("•").cyan(), tag);
    }
    Ok(())
}
