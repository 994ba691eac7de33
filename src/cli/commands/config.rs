//! Print the effective configuration

use minutes_digest::config::Config;
use minutes_digest::output::OutputMode;

/// Print config as TOML (or JSON)
pub fn show_config(config: &Config, mode: OutputMode) -> anyhow::Result<()> {
    match mode {
        OutputMode::Human => print!("{}", config.to_toml()?),
        OutputMode::Json => println!("{}", serde_json::to_string_pretty(config)?),
    }
    Ok(())
}
