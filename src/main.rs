use clap::Parser;
use tracing_subscriber::EnvFilter;

use safepass::cli::commands;
use safepass::cli::{output, Cli, Commands};

fn main() {
    // Diagnostics go to stderr; RUST_LOG=safepass=debug for verbose output.
    // No log statement ever includes a secret.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("safepass=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref username,
            ref target,
            ref folder,
            generate,
            length,
        } => commands::add::execute(
            &cli,
            username,
            target,
            folder.as_deref(),
            generate,
            length,
        ),
        Commands::Remove {
            ref username,
            ref target,
            force,
        } => commands::remove::execute(&cli, username, target, force),
        Commands::List { show, ref folder } => {
            commands::list::execute(&cli, show, folder.as_deref())
        }
        Commands::Show { ref query } => commands::show::execute(&cli, query),
        Commands::Clear { force } => commands::clear::execute(&cli, force),
        Commands::Generate {
            length,
            no_alpha,
            no_digits,
            no_special,
        } => commands::generate::execute(&cli, length, no_alpha, no_digits, no_special),
        Commands::Hash => commands::hash::execute_hash(),
        Commands::Verify { ref salt, ref hash } => commands::hash::execute_verify(salt, hash),
        Commands::Folders => commands::folders::execute(&cli),
        Commands::Completions { shell } => commands::completions::execute(shell),
        #[cfg(feature = "audit-log")]
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        output::failure(&e);
        std::process::exit(1);
    }
}
