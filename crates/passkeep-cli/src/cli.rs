use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// CLI surface definition. Secrets are never accepted as arguments; they
/// are prompted for or generated.
#[derive(Parser, Debug)]
#[command(
    name = "passkeep",
    about = "Local encrypted credential store",
    version,
    propagate_version = true
)]
pub struct Cli {
    /// Path to the encrypted vault file (overrides the config).
    #[arg(long, global = true, value_name = "FILE")]
    pub vault: Option<PathBuf>,

    /// Optional subcommand; defaults to the interactive menu when absent.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Launch the interactive menu.
    Menu,
    /// Store a new credential; the secret is prompted for or generated.
    Add {
        /// Service or website name.
        service: String,
        /// Username or e-mail for the service.
        #[arg(long, short)]
        username: Option<String>,
        /// Free-form notes.
        #[arg(long, short)]
        notes: Option<String>,
        /// Generate the secret instead of prompting for it.
        #[arg(long, short)]
        generate: bool,
    },
    /// Show a stored credential.
    Show {
        service: String,
        /// Also copy the secret to the clipboard.
        #[arg(long, short)]
        copy: bool,
    },
    /// Change fields of a stored credential.
    Update {
        service: String,
        /// New username (omit to keep the current one).
        #[arg(long, short)]
        username: Option<String>,
        /// Prompt for a new secret.
        #[arg(long, short)]
        secret: bool,
        /// Generate a new secret.
        #[arg(long, short, conflicts_with = "secret")]
        generate: bool,
        /// New notes (omit to keep the current ones).
        #[arg(long, short)]
        notes: Option<String>,
    },
    /// Delete a stored credential.
    Delete {
        service: String,
        /// Skip the confirmation prompt.
        #[arg(long, short)]
        yes: bool,
    },
    /// List all stored service names.
    List,
    /// Search stored credentials by service or username.
    Search { query: String },
    /// Generate a password without storing anything.
    Generate {
        /// Password length (defaults to the configured length).
        #[arg(long, short)]
        length: Option<usize>,
        /// Leave out uppercase letters.
        #[arg(long)]
        no_upper: bool,
        /// Leave out lowercase letters.
        #[arg(long)]
        no_lower: bool,
        /// Leave out digits.
        #[arg(long)]
        no_digits: bool,
        /// Leave out symbols.
        #[arg(long)]
        no_symbols: bool,
        /// Copy the result to the clipboard.
        #[arg(long, short)]
        copy: bool,
    },
    /// Print version and exit.
    Version,
    /// Manage CLI configuration.
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Create a default config file if one does not exist.
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_menu_when_missing_subcommand() {
        let cli = Cli::try_parse_from(["passkeep"]).expect("parse should succeed");
        assert_eq!(cli.command, None);
    }

    #[test]
    fn parses_add_with_flags() {
        let cli = Cli::try_parse_from([
            "passkeep", "add", "GitHub", "--username", "octo", "--generate",
        ])
        .expect("parse should succeed");
        assert_eq!(
            cli.command,
            Some(Command::Add {
                service: "GitHub".into(),
                username: Some("octo".into()),
                notes: None,
                generate: true,
            })
        );
    }

    #[test]
    fn rejects_secret_and_generate_together_on_update() {
        let result = Cli::try_parse_from(["passkeep", "update", "GitHub", "--secret", "--generate"]);
        assert!(result.is_err());
    }

    #[test]
    fn parses_generate_with_length_and_exclusions() {
        let cli = Cli::try_parse_from(["passkeep", "generate", "--length", "24", "--no-symbols"])
            .expect("parse should succeed");
        assert_eq!(
            cli.command,
            Some(Command::Generate {
                length: Some(24),
                no_upper: false,
                no_lower: false,
                no_digits: false,
                no_symbols: true,
                copy: false,
            })
        );
    }

    #[test]
    fn parses_global_vault_override_after_subcommand() {
        let cli = Cli::try_parse_from(["passkeep", "list", "--vault", "/tmp/alt.enc"])
            .expect("parse should succeed");
        assert_eq!(cli.vault, Some(PathBuf::from("/tmp/alt.enc")));
        assert_eq!(cli.command, Some(Command::List));
    }

    #[test]
    fn parses_config_init_subcommand() {
        let cli = Cli::try_parse_from(["passkeep", "config", "init"]).expect("parse should succeed");
        assert_eq!(cli.command, Some(Command::Config(ConfigCommand::Init)));
    }
}
