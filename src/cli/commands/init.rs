//! `safepass init`: create the config file and an empty store.

use std::fs;

use crate::cli::output;
use crate::cli::{audit, config_path, load_config, store_path, Cli};
use crate::config::AppConfig;
use crate::errors::{Result, SafePassError};
use crate::vault::CredentialStore;

/// Execute the `init` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let config_file = config_path(cli)?;
    let config = load_config(cli)?;
    let path = store_path(cli, &config);

    // 1. Refuse to clobber an existing store.
    if path.exists() {
        output::tip("Use `safepass add` to add credentials to the existing store.");
        return Err(SafePassError::StoreAlreadyExists(path));
    }

    // 2. Write the config file so later commands find this store.
    if config_file.exists() {
        let mut updated = config;
        updated.file_location = path.to_string_lossy().into_owned();
        updated.save(&config_file)?;
    } else {
        AppConfig::create(&config_file, &path.to_string_lossy())?;
        output::info(&format!("Created config file: {}", config_file.display()));
    }

    // 3. Create the store directory and persist an empty store.
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    CredentialStore::new().save(&path)?;

    audit(&path, "init", None, Some("store created"));

    output::success(&format!("Store created at {}", path.display()));
    output::tip("Run `safepass add <USERNAME> <TARGET>` to add a credential.");
    output::tip("Run `safepass generate` to create a strong secret.");

    Ok(())
}
