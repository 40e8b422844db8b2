//! `safepass clear`: remove every credential from the store.

use crate::cli::output;
use crate::cli::{audit, confirm, load_config, open_store, store_path, Cli};
use crate::errors::Result;

/// Execute the `clear` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let config = load_config(cli)?;
    let path = store_path(cli, &config);
    let store = open_store(&path)?;

    let count = store.len();
    if count == 0 {
        output::info("Store is already empty.");
        return Ok(());
    }

    if !force && !confirm(&format!("Remove all {count} credential(s)?"))? {
        output::info("Cancelled.");
        return Ok(());
    }

    store.clear();
    store.save(&path)?;

    audit(&path, "clear", None, Some(&format!("{count} removed")));
    output::success(&format!("Removed {count} credential(s)"));

    Ok(())
}
