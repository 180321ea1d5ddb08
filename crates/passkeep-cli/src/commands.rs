//! Non-interactive subcommand handlers. Each one speaks to an already
//! unlocked vault; prompting for the master password happens earlier.

use color_eyre::{eyre::bail, Result};
use dialoguer::{theme::ColorfulTheme, Confirm, Password};
use passkeep_core::record::{CredentialRecord, RecordPatch};
use passkeep_crypto::master_cipher::MasterCipher;
use passkeep_gen::{generate, PasswordRules};
use passkeep_store::vault::CredentialVault;

use crate::clipboard;

pub(crate) type Vault = CredentialVault<MasterCipher>;

pub fn add(
    vault: &mut Vault,
    service: &str,
    username: Option<String>,
    notes: Option<String>,
    generate_secret: bool,
    rules: &PasswordRules,
) -> Result<()> {
    let service = service.trim();
    if service.is_empty() {
        bail!("service name cannot be empty");
    }
    let secret = if generate_secret {
        let secret = generate(rules)?;
        println!("Generated secret: {secret}");
        clipboard::copy_with_notice(&secret);
        secret
    } else {
        prompt_secret("Secret")?
    };
    let username = username.unwrap_or_default();
    let notes = notes.unwrap_or_default();
    if !vault.add(service, &username, &secret, &notes)? {
        bail!("a credential for '{service}' already exists");
    }
    println!("Stored credential for '{service}'.");
    Ok(())
}

pub fn show(vault: &Vault, service: &str, copy: bool) -> Result<()> {
    let service = service.trim();
    match vault.get(service) {
        Some(record) => {
            print_record(record);
            if copy {
                clipboard::copy_with_notice(&record.secret);
            }
        }
        None => println!("No credential found for '{service}'."),
    }
    Ok(())
}

pub fn update(
    vault: &mut Vault,
    service: &str,
    username: Option<String>,
    new_secret: bool,
    generate_secret: bool,
    notes: Option<String>,
    rules: &PasswordRules,
) -> Result<()> {
    let service = service.trim();
    let secret = if generate_secret {
        let secret = generate(rules)?;
        println!("Generated secret: {secret}");
        clipboard::copy_with_notice(&secret);
        Some(secret)
    } else if new_secret {
        Some(prompt_secret("New secret")?)
    } else {
        None
    };
    let patch = RecordPatch {
        username,
        secret,
        notes,
    };
    if !vault.update(service, patch)? {
        bail!("no credential found for '{service}'");
    }
    println!("Updated credential for '{service}'.");
    Ok(())
}

pub fn delete(vault: &mut Vault, service: &str, yes: bool) -> Result<()> {
    let service = service.trim();
    if vault.get(service).is_none() {
        bail!("no credential found for '{service}'");
    }
    if !yes {
        let confirmed = Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("Delete the credential for '{service}'?"))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Deletion cancelled.");
            return Ok(());
        }
    }
    if vault.delete(service)? {
        println!("Deleted credential for '{service}'.");
    }
    Ok(())
}

pub fn list(vault: &Vault) -> Result<()> {
    let mut services = vault.list_services();
    if services.is_empty() {
        println!("No credentials stored yet.");
        return Ok(());
    }
    services.sort_unstable_by_key(|name| name.to_lowercase());
    println!("{} service(s):", services.len());
    for (index, name) in services.iter().enumerate() {
        println!("{:>3}. {name}", index + 1);
    }
    Ok(())
}

pub fn search(vault: &Vault, query: &str) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        bail!("search query cannot be empty");
    }
    let matches = vault.search(query);
    if matches.is_empty() {
        println!("No credentials match '{query}'.");
        return Ok(());
    }
    println!("{} match(es):", matches.len());
    for (index, record) in matches.iter().enumerate() {
        println!("{:>3}. {} ({})", index + 1, record.service, record.username);
    }
    Ok(())
}

pub fn generate_password(
    defaults: &PasswordRules,
    length: Option<usize>,
    no_upper: bool,
    no_lower: bool,
    no_digits: bool,
    no_symbols: bool,
    copy: bool,
) -> Result<()> {
    let rules = resolve_rules(defaults, length, no_upper, no_lower, no_digits, no_symbols);
    let password = generate(&rules)?;
    println!("{password}");
    if copy {
        clipboard::copy_with_notice(&password);
    }
    Ok(())
}

/// Fold the exclusion flags and optional length into the configured
/// defaults. Flags only ever remove classes.
fn resolve_rules(
    defaults: &PasswordRules,
    length: Option<usize>,
    no_upper: bool,
    no_lower: bool,
    no_digits: bool,
    no_symbols: bool,
) -> PasswordRules {
    PasswordRules {
        length: length.unwrap_or(defaults.length),
        uppercase: defaults.uppercase && !no_upper,
        lowercase: defaults.lowercase && !no_lower,
        digits: defaults.digits && !no_digits,
        symbols: defaults.symbols && !no_symbols,
    }
}

pub(crate) fn print_record(record: &CredentialRecord) {
    println!("Service:  {}", record.service);
    println!("Username: {}", record.username);
    println!("Secret:   {}", record.secret);
    if !record.notes.is_empty() {
        println!("Notes:    {}", record.notes);
    }
    println!("Created:  {}", record.created_at.format("%Y-%m-%d %H:%M:%S"));
    println!("Modified: {}", record.modified_at.format("%Y-%m-%d %H:%M:%S"));
}

fn prompt_secret(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}
