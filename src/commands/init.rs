use crate::config::{Config, CONFIG_FILE_NAME};
use anyhow::Result;
use std::path::PathBuf;

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(&config_path, Config::default_toml())?;
    println!("Created {CONFIG_FILE_NAME} configuration file");

    Ok(())
}
