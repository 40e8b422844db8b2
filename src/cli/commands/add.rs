//! `safepass add`: add a credential to the store.

use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::{audit, folder_registry, load_config, open_store, read_secret, store_path, Cli};
use crate::crypto::{generate_secret, CharacterClasses};
use crate::errors::{Result, SafePassError};
use crate::vault::CredentialEntry;

/// Execute the `add` command.
pub fn execute(
    cli: &Cli,
    username: &str,
    target: &str,
    folder: Option<&str>,
    generate: bool,
    length: Option<usize>,
) -> Result<()> {
    let config = load_config(cli)?;
    let path = store_path(cli, &config);

    // Unknown folders are rejected before any secret is read.
    if let Some(name) = folder {
        let registry = folder_registry(&config);
        if !registry.exists(name) {
            return Err(SafePassError::Validation(format!(
                "unknown folder '{name}' (known: {})",
                registry.names().join(", ")
            )));
        }
    }

    let store = open_store(&path)?;

    let secret: Zeroizing<String> = if generate {
        let len = length.unwrap_or(config.generator_length);
        generate_secret(CharacterClasses::all(), len)?
    } else {
        read_secret(&format!("Enter secret for {username} on {target}"), true)?
    };

    let mut entry = CredentialEntry::new(username, secret.as_str(), target)?;
    if let Some(name) = folder {
        entry = entry.with_folder(name);
    }

    store.add(entry)?;
    store.save(&path)?;

    audit(&path, "add", Some(target), Some(username));

    output::success(&format!(
        "Added credential for '{username}' on '{target}' ({} total)",
        store.len()
    ));
    if generate {
        output::info(&format!("Generated secret: {}", secret.as_str()));
    }

    Ok(())
}
