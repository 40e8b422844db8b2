//! `safepass show`: print matching credentials with their secrets.

use crate::cli::output;
use crate::cli::{load_config, open_store, store_path, Cli};
use crate::errors::Result;

/// Execute the `show` command.
pub fn execute(cli: &Cli, query: &str) -> Result<()> {
    let config = load_config(cli)?;
    let path = store_path(cli, &config);
    let store = open_store(&path)?;

    let matches = store.find_by_target(query);
    if matches.is_empty() {
        output::info(&format!("No credentials match '{query}'."));
        return Ok(());
    }

    output::print_entries_table(&matches, true);
    Ok(())
}
