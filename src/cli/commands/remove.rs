//! `safepass remove`: remove a credential from the store.

use crate::cli::output;
use crate::cli::{audit, confirm, load_config, open_store, read_secret, store_path, Cli};
use crate::errors::{Result, SafePassError};
use crate::vault::CredentialEntry;

/// Execute the `remove` command.
///
/// Credentials are identified by username, target and secret.  When only
/// one stored credential has this username and target the secret is not
/// asked for; otherwise the user must type it to pick the right one.
pub fn execute(cli: &Cli, username: &str, target: &str, force: bool) -> Result<()> {
    let config = load_config(cli)?;
    let path = store_path(cli, &config);
    let store = open_store(&path)?;

    let candidates: Vec<CredentialEntry> = store
        .list()
        .into_iter()
        .filter(|e| e.username() == username && e.target() == target)
        .collect();

    let entry = match candidates.as_slice() {
        [] => {
            return Err(SafePassError::EntryNotFound {
                username: username.to_string(),
                target: target.to_string(),
            })
        }
        [only] => only.clone(),
        _ => {
            output::info(&format!(
                "{} credentials match '{username}' on '{target}'.",
                candidates.len()
            ));
            let secret = read_secret("Enter the secret of the credential to remove", false)?;
            CredentialEntry::new(username, secret.as_str(), target)?
        }
    };

    if !force && !confirm(&format!("Remove credential for '{username}' on '{target}'?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    store.remove(&entry)?;
    store.save(&path)?;

    audit(&path, "remove", Some(target), Some(username));
    output::success(&format!("Removed credential for '{username}' on '{target}'"));

    Ok(())
}
