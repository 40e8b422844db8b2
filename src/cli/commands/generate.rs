//! `safepass generate`: print a random secret.

use crate::cli::{load_config, Cli};
use crate::crypto::{generate_secret, CharacterClasses};
use crate::errors::Result;

/// Execute the `generate` command.
///
/// The secret goes to stdout with no decoration so it can be piped.
pub fn execute(
    cli: &Cli,
    length: Option<usize>,
    no_alpha: bool,
    no_digits: bool,
    no_special: bool,
) -> Result<()> {
    let config = load_config(cli)?;
    let classes = CharacterClasses {
        special: !no_special,
        digits: !no_digits,
        alpha: !no_alpha,
    };

    let secret = generate_secret(classes, length.unwrap_or(config.generator_length))?;
    println!("{}", secret.as_str());

    Ok(())
}
