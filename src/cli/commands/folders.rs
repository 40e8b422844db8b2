//! `safepass folders`: list the known folders.

use console::style;

use crate::cli::{folder_registry, load_config, Cli};
use crate::errors::Result;

/// Execute the `folders` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    let registry = folder_registry(&config);

    for name in registry.names() {
        let is_default = registry.get(name).is_some_and(|f| f.is_default());
        if is_default {
            println!("{name} {}", style("(default)").dim());
        } else {
            println!("{name}");
        }
    }

    Ok(())
}
