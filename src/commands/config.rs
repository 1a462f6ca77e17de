//! Config command - show or change saved settings

use anyhow::Context;
use taskboard::config::Config;
use taskboard::output::{ConfigResult, OperationResult, OutputMode};

use crate::cli::ConfigAction;

/// Handle config subcommands
pub fn config_cmd(action: ConfigAction, mode: OutputMode) -> anyhow::Result<bool> {
    match action {
        ConfigAction::Show => {
            ConfigResult::new(&Config::config_path(), &Config::load()).render(mode);
        },
        ConfigAction::SetUrl { url } => {
            let parsed =
                reqwest::Url::parse(&url).with_context(|| format!("Invalid API URL: {url}"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                anyhow::bail!("Invalid API URL: {url} (expected http or https)");
            }

            let config = Config::load().with_api_url(url);
            config.save()?;
            OperationResult::ok(format!("API URL set to {}", config.api.url)).render(mode);
        },
    }
    Ok(true)
}
