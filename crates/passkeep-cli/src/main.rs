mod auth;
mod cli;
mod clipboard;
mod commands;
mod config;
mod menu;

use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::ConfigCommand;

/// Entry point wiring the CLI to the encrypted vault.
fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let cli = cli::Cli::parse();
    let config = config::load()?;
    let vault_path = config::vault_path(cli.vault, &config)?;
    let rules = config.generator_rules();

    match cli.command.unwrap_or(cli::Command::Menu) {
        cli::Command::Menu => {
            let mut vault = auth::open_vault(&vault_path)?;
            menu::run(&mut vault, &rules)?
        }
        cli::Command::Add {
            service,
            username,
            notes,
            generate,
        } => {
            let mut vault = auth::open_vault(&vault_path)?;
            commands::add(&mut vault, &service, username, notes, generate, &rules)?
        }
        cli::Command::Show { service, copy } => {
            let vault = auth::open_vault(&vault_path)?;
            commands::show(&vault, &service, copy)?
        }
        cli::Command::Update {
            service,
            username,
            secret,
            generate,
            notes,
        } => {
            let mut vault = auth::open_vault(&vault_path)?;
            commands::update(&mut vault, &service, username, secret, generate, notes, &rules)?
        }
        cli::Command::Delete { service, yes } => {
            let mut vault = auth::open_vault(&vault_path)?;
            commands::delete(&mut vault, &service, yes)?
        }
        cli::Command::List => {
            let vault = auth::open_vault(&vault_path)?;
            commands::list(&vault)?
        }
        cli::Command::Search { query } => {
            let vault = auth::open_vault(&vault_path)?;
            commands::search(&vault, &query)?
        }
        cli::Command::Generate {
            length,
            no_upper,
            no_lower,
            no_digits,
            no_symbols,
            copy,
        } => commands::generate_password(&rules, length, no_upper, no_lower, no_digits, no_symbols, copy)?,
        cli::Command::Version => print_version(),
        cli::Command::Config(ConfigCommand::Init) => init_config(&config)?,
    }

    Ok(())
}

fn init_tracing() {
    // Respect user-provided filters, default to warn so prompts stay clean.
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn print_version() {
    println!("passkeep {}", env!("CARGO_PKG_VERSION"));
}

fn init_config(config: &config::Config) -> Result<()> {
    let path = config::write_default_if_missing(config)?;
    println!("Config initialized at {}", path.display());
    Ok(())
}
