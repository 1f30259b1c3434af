//! Config command: inspect configuration.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&settings)?;
            Output::header("Current Configuration");
            println!("{}", content);
        }
        ConfigAction::Path => {
            println!("{}", Settings::default_config_path().display());
        }
    }
    Ok(())
}
