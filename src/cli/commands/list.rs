//! `safepass list`: display all credentials in a table.

use crate::cli::output;
use crate::cli::{load_config, open_store, store_path, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, show: bool, folder: Option<&str>) -> Result<()> {
    let config = load_config(cli)?;
    let path = store_path(cli, &config);
    let store = open_store(&path)?;

    let entries = match folder {
        Some(name) => store.in_folder(name),
        None => store.list(),
    };

    output::info(&format!(
        "{}: {} credential(s)",
        path.display(),
        entries.len()
    ));

    output::print_entries_table(&entries, show);

    Ok(())
}
