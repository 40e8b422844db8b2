//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::AppConfig;
use crate::errors::{Result, SafePassError};
use crate::vault::{CredentialStore, FolderRegistry};

/// Environment variable read before prompting for a secret.
pub const SECRET_ENV_VAR: &str = "SAFEPASS_SECRET";

/// SafePass CLI: local credential manager.
#[derive(Parser)]
#[command(name = "safepass", about = "Local credential manager", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Store file to use (default: the config's fileLocation)
    #[arg(long, global = true, env = "SAFEPASS_STORE")]
    pub store: Option<String>,

    /// Config file to use (default: ~/SafePassConfig/config.json)
    #[arg(long, global = true, env = "SAFEPASS_CONFIG")]
    pub config: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Create the config file and an empty store
    Init,

    /// Add a credential
    Add {
        /// Username for the login
        username: String,
        /// Website or application the login belongs to
        target: String,
        /// Folder to file the credential under
        #[arg(short, long)]
        folder: Option<String>,
        /// Generate a random secret instead of prompting for one
        #[arg(short, long)]
        generate: bool,
        /// Length of the generated secret (default: from config)
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// Remove a credential
    Remove {
        /// Username of the login
        username: String,
        /// Website or application of the login
        target: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List all credentials
    List {
        /// Reveal secrets instead of masking them
        #[arg(long)]
        show: bool,
        /// Only list credentials in this folder
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Show credentials (with secrets) whose target matches a search term
    Show {
        /// Case-insensitive substring of the target
        query: String,
    },

    /// Remove every credential from the store
    Clear {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random secret
    Generate {
        /// Number of characters (default: from config)
        #[arg(short, long)]
        length: Option<usize>,
        /// Exclude letters
        #[arg(long)]
        no_alpha: bool,
        /// Exclude digits
        #[arg(long)]
        no_digits: bool,
        /// Exclude special characters
        #[arg(long)]
        no_special: bool,
    },

    /// Derive a salted PBKDF2 hash of a secret
    Hash,

    /// Check a secret against a salt and hash
    Verify {
        /// Base64 salt printed by `hash`
        salt: String,
        /// Base64 hash printed by `hash`
        hash: String,
    },

    /// List known folders
    Folders,

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// View the audit log of store operations
    #[cfg(feature = "audit-log")]
    Audit {
        /// Number of entries to show (default: 50)
        #[arg(long, default_value = "50")]
        last: usize,
        /// Show entries since a duration ago (e.g. 7d, 24h, 30m)
        #[arg(long)]
        since: Option<String>,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the config file path from `--config` or the default location.
pub fn config_path(cli: &Cli) -> Result<PathBuf> {
    match &cli.config {
        Some(path) => Ok(PathBuf::from(path)),
        None => AppConfig::default_path(),
    }
}

/// Load the app config (defaults if the file is missing).
pub fn load_config(cli: &Cli) -> Result<AppConfig> {
    AppConfig::load(&config_path(cli)?)
}

/// Resolve the store path: `--store` wins, then the config's `fileLocation`.
pub fn store_path(cli: &Cli, config: &AppConfig) -> PathBuf {
    match &cli.store {
        Some(path) => PathBuf::from(path),
        None => config.store_path(),
    }
}

/// Open the store, pointing the user at `init` if it does not exist yet.
pub fn open_store(path: &std::path::Path) -> Result<CredentialStore> {
    CredentialStore::open(path).inspect_err(|e| {
        if matches!(e, SafePassError::StoreNotFound(_)) {
            output::tip("Run `safepass init` to create a store.");
        }
    })
}

/// Folder registry seeded with the defaults and the config's folders.
pub fn folder_registry(config: &AppConfig) -> FolderRegistry {
    FolderRegistry::with_extra(&config.folders)
}

/// Read a secret, trying in order:
/// 1. `SAFEPASS_SECRET` env var (scripts/CI)
/// 2. Piped stdin
/// 3. Interactive hidden prompt (with confirmation if `confirm`)
///
/// Returns `Zeroizing<String>` so the secret is wiped from memory on drop.
pub fn read_secret(prompt: &str, confirm: bool) -> Result<Zeroizing<String>> {
    if let Ok(secret) = std::env::var(SECRET_ENV_VAR) {
        if !secret.is_empty() {
            return Ok(Zeroizing::new(secret));
        }
    }

    if !io::stdin().is_terminal() {
        let mut buf = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut buf)?;
        let trimmed = buf.trim_end_matches(['\r', '\n']).len();
        buf.truncate(trimmed);
        return Ok(buf);
    }

    let mut input = dialoguer::Password::new().with_prompt(prompt);
    if confirm {
        input = input.with_confirmation("Confirm secret", "Secrets do not match, try again");
    }
    let secret = input
        .interact()
        .map_err(|e| SafePassError::CommandFailed(format!("secret prompt: {e}")))?;
    Ok(Zeroizing::new(secret))
}

/// Ask a yes/no question, defaulting to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| SafePassError::CommandFailed(format!("confirm prompt: {e}")))
}

/// Record an operation in the audit log (no-op without `audit-log`).
pub fn audit(store_path: &std::path::Path, op: &str, target: Option<&str>, details: Option<&str>) {
    #[cfg(feature = "audit-log")]
    crate::audit::log_audit(store_path, op, target, details);

    #[cfg(not(feature = "audit-log"))]
    let _ = (store_path, op, target, details);
}
