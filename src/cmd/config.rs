use std::path::Path;

use anyhow::Result;

use embedres::config::config_path;
use embedres::EmbedConfig;

pub fn cmd_config(config: &EmbedConfig, explicit: Option<&Path>) -> Result<()> {
    let path = explicit.map_or_else(config_path, Path::to_path_buf);
    let status = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("⚙️  Config: {}{status}\n", path.display());
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}
