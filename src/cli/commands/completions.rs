//! `safepass completions`: generate shell completion scripts.
//!
//! Usage:
//!   safepass completions bash > ~/.bash_completion.d/safepass
//!   safepass completions zsh

use std::io;

use clap::CommandFactory;
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::errors::Result;

/// Execute the `completions` command.
pub fn execute(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "safepass", &mut io::stdout());
    Ok(())
}
