use crate::cert::{collect_entries, import_pfx_file, remove_by_thumbprint, RemoveOutcome};
use crate::cli::args::{Cli, Commands};
use crate::cli::completions::handle_completion_command;
use crate::store::{PlatformProvider, StoreProvider};
use crate::utils::errors::Result;
use clap::CommandFactory;
use std::io;
use std::path::Path;

pub fn handle_command(cli: Cli) -> Result<()> {
    // Initialize logging - always to stderr
    if !cli.quiet {
        let log_level = match cli.verbose {
            0 => "certmgr=warn",  // Default: warnings only
            1 => "certmgr=info",  // -v: info level
            2 => "certmgr=debug", // -vv: debug level
            _ => "certmgr=trace", // -vvv+: trace level
        };

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_env_filter(log_level)
            .init();
    }

    dispatch(cli, &PlatformProvider)
}

/// Map a parsed command onto calls against the injected store provider.
pub fn dispatch(cli: Cli, provider: &dyn StoreProvider) -> Result<()> {
    match cli.command {
        Commands::Import {
            path,
            file,
            password,
        } => {
            // Positional path wins over --file
            let Some(pfx_path) = resolve_arg(path, file) else {
                return print_subcommand_help("import");
            };

            let mut store = provider.open(&cli.store_name, cli.store_location)?;
            import_pfx_file(
                store.as_mut(),
                Path::new(&pfx_path),
                password.as_deref().unwrap_or(""),
            )
        }
        Commands::Ls => {
            let mut store = provider.open(&cli.store_name, cli.store_location)?;
            for entry in collect_entries(store.as_mut())? {
                println!("{} {}", entry.fingerprint, entry.common_name);
            }
            Ok(())
        }
        Commands::Rm {
            thumbprint,
            thumbprint_flag,
        } => {
            let Some(thumb) = resolve_arg(thumbprint, thumbprint_flag) else {
                return print_subcommand_help("rm");
            };
            let thumb = thumb.to_lowercase();

            let mut store = provider.open(&cli.store_name, cli.store_location)?;
            match remove_by_thumbprint(store.as_mut(), &thumb)? {
                RemoveOutcome::Removed => {
                    tracing::info!("removed {thumb}");
                    Ok(())
                }
                // Reported but still a zero-exit outcome
                RemoveOutcome::NotFound => {
                    tracing::warn!("{thumb} not found");
                    Ok(())
                }
            }
        }
        Commands::Completion { command } => handle_completion_command(&command),
    }
}

/// Resolve an argument that can arrive positionally or via a flag.
/// The positional wins; an empty string counts as absent either way.
fn resolve_arg(positional: Option<String>, flag: Option<String>) -> Option<String> {
    positional
        .filter(|s| !s.is_empty())
        .or_else(|| flag.filter(|s| !s.is_empty()))
}

/// Missing required argument is a usage condition, not a failure: show the
/// subcommand help and let the process exit zero.
fn print_subcommand_help(name: &str) -> Result<()> {
    let mut cmd = Cli::command();
    if let Some(sub) = cmd.find_subcommand_mut(name) {
        sub.print_help()?;
    }
    Ok(())
}
