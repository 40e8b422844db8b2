//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::errors::SafePassError;
use crate::vault::CredentialEntry;

/// Shown in place of a secret when secrets are hidden.
const MASK: &str = "********";

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print an error with its machine-readable kind: "x_mark [kind] {msg}"
pub fn failure(err: &SafePassError) {
    error(&format!("[{}] {err}", style(err.kind()).dim()));
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of credentials (Username, Target, Folder, Secret).
pub fn print_entries_table(entries: &[CredentialEntry], show_secrets: bool) {
    if entries.is_empty() {
        info("No credentials in this store yet.");
        tip("Run `safepass add <USERNAME> <TARGET>` to add your first credential.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Username", "Target", "Folder", "Secret"]);

    for e in entries {
        table.add_row(vec![
            e.username().to_string(),
            e.target().to_string(),
            e.folder().unwrap_or("-").to_string(),
            if show_secrets {
                e.secret().to_string()
            } else {
                MASK.to_string()
            },
        ]);
    }

    println!("{table}");
}
