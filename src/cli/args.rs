use crate::store::StoreLocation;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(name = "certmgr")]
#[command(version)]
#[command(about = "The missing certificate management tool for Windows Nano Server")]
#[command(long_about = None)]
pub struct Cli {
    /// Certificate store name
    #[arg(long, global = true, default_value = "MY")]
    pub store_name: String,

    /// Certificate store location (current-user or local-machine)
    #[arg(long, global = true, default_value = "current-user")]
    pub store_location: StoreLocation,

    /// Enable verbose logging (repeat for more verbosity: -v INFO, -vv DEBUG, -vvv TRACE)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Import a PFX into the store
    Import {
        /// Path to the PFX file
        #[arg(value_name = "path/to/pfx")]
        path: Option<String>,

        /// Path to the PFX file (alternative to the positional argument)
        #[arg(long, short = 'f')]
        file: Option<String>,

        /// Password for the PFX
        #[arg(long, short = 'p')]
        password: Option<String>,
    },
    /// List certificates in the store
    Ls,
    /// Remove a certificate from the store
    Rm {
        /// Thumbprint of the certificate to be deleted
        #[arg(value_name = "thumbprint")]
        thumbprint: Option<String>,

        /// Thumbprint of the certificate to be deleted (alternative to the positional argument)
        #[arg(long = "thumbprint", short = 't', value_name = "thumbprint")]
        thumbprint_flag: Option<String>,
    },
    /// Generate shell completion scripts
    Completion {
        #[command(subcommand)]
        command: CompletionCommands,
    },
}

#[derive(Subcommand)]
pub enum CompletionCommands {
    /// Generate bash completion script
    Bash,
    /// Generate zsh completion script
    Zsh,
    /// Generate fish completion script
    Fish,
    /// Generate PowerShell completion script
    PowerShell,
}

impl CompletionCommands {
    pub fn shell(&self) -> Shell {
        match self {
            CompletionCommands::Bash => Shell::Bash,
            CompletionCommands::Zsh => Shell::Zsh,
            CompletionCommands::Fish => Shell::Fish,
            CompletionCommands::PowerShell => Shell::PowerShell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["certmgr", "ls"]).unwrap();
        assert_eq!(cli.store_name, "MY");
        assert_eq!(cli.store_location, StoreLocation::CurrentUser);
        assert!(matches!(cli.command, Commands::Ls));
    }

    #[test]
    fn test_store_flags_accepted_after_subcommand() {
        let cli = Cli::try_parse_from([
            "certmgr",
            "ls",
            "--store-name",
            "ROOT",
            "--store-location",
            "local-machine",
        ])
        .unwrap();
        assert_eq!(cli.store_name, "ROOT");
        assert_eq!(cli.store_location, StoreLocation::LocalMachine);
    }

    #[test]
    fn test_unsupported_store_location_fails_at_parse_time() {
        let err = Cli::try_parse_from(["certmgr", "--store-location", "remote", "ls"])
            .err()
            .expect("parse should fail");
        assert!(err.to_string().contains("unsupported store remote"));
    }

    #[test]
    fn test_import_positional_and_flags() {
        let cli = Cli::try_parse_from(["certmgr", "import", "a.pfx", "-f", "b.pfx", "-p", "pw"])
            .unwrap();
        match cli.command {
            Commands::Import {
                path,
                file,
                password,
            } => {
                assert_eq!(path.as_deref(), Some("a.pfx"));
                assert_eq!(file.as_deref(), Some("b.pfx"));
                assert_eq!(password.as_deref(), Some("pw"));
            }
            _ => panic!("expected import"),
        }
    }

    #[test]
    fn test_rm_thumbprint_flag() {
        let cli = Cli::try_parse_from(["certmgr", "rm", "-t", "ABCD"]).unwrap();
        match cli.command {
            Commands::Rm {
                thumbprint,
                thumbprint_flag,
            } => {
                assert_eq!(thumbprint, None);
                assert_eq!(thumbprint_flag.as_deref(), Some("ABCD"));
            }
            _ => panic!("expected rm"),
        }
    }
}
