//! `safepass audit`: display the audit log.
//!
//! Usage:
//!   safepass audit               # show last 50 entries
//!   safepass audit --last 20     # show last 20
//!   safepass audit --since 7d    # entries from last 7 days

use chrono::Utc;

use crate::audit::{audit_dir, AuditEntry, AuditLog};
use crate::cli::output;
use crate::cli::{load_config, store_path, Cli};
use crate::errors::{Result, SafePassError};

/// Execute the `audit` command.
pub fn execute(cli: &Cli, last: usize, since: Option<&str>) -> Result<()> {
    let config = load_config(cli)?;
    let path = store_path(cli, &config);

    let audit = AuditLog::open(&audit_dir(&path))
        .ok_or_else(|| SafePassError::AuditError("failed to open audit database".into()))?;

    let since_dt = match since {
        Some(s) => Some(parse_duration(s)?),
        None => None,
    };

    let entries = audit.query(last, since_dt)?;

    if entries.is_empty() {
        output::info("No audit entries found.");
        return Ok(());
    }

    print_audit_table(&entries);

    Ok(())
}

/// Parse a human-friendly duration string like "7d", "24h", "30m".
fn parse_duration(input: &str) -> Result<chrono::DateTime<Utc>> {
    let input = input.trim();

    let (num_str, duration_of): (&str, fn(i64) -> chrono::Duration) =
        if let Some(s) = input.strip_suffix('d') {
            (s, chrono::Duration::days)
        } else if let Some(s) = input.strip_suffix('h') {
            (s, chrono::Duration::hours)
        } else if let Some(s) = input.strip_suffix('m') {
            (s, chrono::Duration::minutes)
        } else {
            return Err(SafePassError::CommandFailed(format!(
                "invalid duration '{input}': use a format like 7d, 24h, or 30m"
            )));
        };

    let num: i64 = num_str.parse().map_err(|_| {
        SafePassError::CommandFailed(format!(
            "invalid duration '{input}': number part is not valid"
        ))
    })?;

    Ok(Utc::now() - duration_of(num))
}

/// Print audit entries in a formatted table.
pub fn print_audit_table(entries: &[AuditEntry]) {
    use comfy_table::{ContentArrangement, Table};
    use console::style;

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Time", "Operation", "Store", "Target", "Details"]);

    for entry in entries {
        table.add_row(vec![
            entry.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            colorize_operation(&entry.operation),
            entry.store.clone(),
            entry.target.as_deref().unwrap_or("-").to_string(),
            entry.details.as_deref().unwrap_or("-").to_string(),
        ]);
    }

    println!(
        "{}",
        style(format!("{} audit entries:", entries.len())).bold()
    );
    println!("{table}");
}

/// Colorize operation names for display.
fn colorize_operation(op: &str) -> String {
    use console::style;

    match op {
        "init" => style(op).green().to_string(),
        "add" => style(op).blue().to_string(),
        "remove" | "clear" => style(op).red().to_string(),
        _ => op.to_string(),
    }
}
