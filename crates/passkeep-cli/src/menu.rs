//! Interactive menu, the default entry point.

use color_eyre::Result;
use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Password, Select};
use passkeep_core::record::RecordPatch;
use passkeep_gen::{generate, PasswordRules};

use crate::{
    clipboard,
    commands::{self, Vault},
};

const ACTIONS: &[&str] = &[
    "Add a credential",
    "View a credential",
    "Update a credential",
    "Delete a credential",
    "List services",
    "Search",
    "Generate a password",
    "Quit",
];

/// Run the menu against an unlocked vault until the user quits.
///
/// A failed action reports its error and returns to the menu; only
/// prompt-level failures (such as a closed terminal) end the loop.
pub fn run(vault: &mut Vault, rules: &PasswordRules) -> Result<()> {
    let theme = ColorfulTheme::default();
    println!(
        "{}",
        style("passkeep: local encrypted credential store").cyan().bold()
    );
    loop {
        println!();
        let choice = Select::with_theme(&theme)
            .with_prompt("What would you like to do?")
            .items(ACTIONS)
            .default(0)
            .interact()?;
        let outcome = match choice {
            0 => add(vault, &theme, rules),
            1 => view(vault, &theme),
            2 => update(vault, &theme, rules),
            3 => delete(vault, &theme),
            4 => commands::list(vault),
            5 => search(vault, &theme),
            6 => generate_password(rules),
            _ => break,
        };
        if let Err(err) = outcome {
            eprintln!("{} {err:#}", style("error:").red().bold());
        }
    }
    println!("Locked up. Bye.");
    Ok(())
}

fn add(vault: &mut Vault, theme: &ColorfulTheme, rules: &PasswordRules) -> Result<()> {
    let service = prompt_service(theme)?;
    if vault.get(&service).is_some() {
        println!("A credential for '{service}' already exists.");
        return Ok(());
    }
    let username: String = Input::with_theme(theme)
        .with_prompt("Username/e-mail")
        .allow_empty(true)
        .interact_text()?;
    let secret = prompt_new_secret(theme, rules, &["Type it in", "Generate a strong one"])?;
    let notes: String = Input::with_theme(theme)
        .with_prompt("Notes (optional)")
        .allow_empty(true)
        .interact_text()?;
    if vault.add(&service, &username, &secret, &notes)? {
        println!("Stored credential for '{service}'.");
    }
    Ok(())
}

fn view(vault: &Vault, theme: &ColorfulTheme) -> Result<()> {
    let service = prompt_service(theme)?;
    match vault.get(&service) {
        Some(record) => {
            commands::print_record(record);
            let copy = Confirm::with_theme(theme)
                .with_prompt("Copy the secret to the clipboard?")
                .default(false)
                .interact()?;
            if copy {
                clipboard::copy_with_notice(&record.secret);
            }
        }
        None => println!("No credential found for '{service}'."),
    }
    Ok(())
}

fn update(vault: &mut Vault, theme: &ColorfulTheme, rules: &PasswordRules) -> Result<()> {
    let service = prompt_service(theme)?;
    let Some(current) = vault.get(&service).cloned() else {
        println!("No credential found for '{service}'.");
        return Ok(());
    };
    println!("Updating '{}'. Leave a field empty to keep it.", current.service);
    let username: String = Input::with_theme(theme)
        .with_prompt(format!("Username [{}]", current.username))
        .allow_empty(true)
        .interact_text()?;
    let pick = Select::with_theme(theme)
        .with_prompt("Secret")
        .items(&["Keep the current one", "Type a new one", "Generate a new one"])
        .default(0)
        .interact()?;
    let secret = match pick {
        1 => Some(
            Password::with_theme(theme)
                .with_prompt("New secret")
                .interact()?,
        ),
        2 => {
            let secret = generate(rules)?;
            println!("Generated: {secret}");
            clipboard::copy_with_notice(&secret);
            Some(secret)
        }
        _ => None,
    };
    let notes: String = Input::with_theme(theme)
        .with_prompt(format!("Notes [{}]", current.notes))
        .allow_empty(true)
        .interact_text()?;
    let patch = RecordPatch {
        username: not_empty(username),
        secret,
        notes: not_empty(notes),
    };
    if vault.update(&service, patch)? {
        println!("Updated credential for '{service}'.");
    }
    Ok(())
}

fn delete(vault: &mut Vault, theme: &ColorfulTheme) -> Result<()> {
    let service = prompt_service(theme)?;
    if vault.get(&service).is_none() {
        println!("No credential found for '{service}'.");
        return Ok(());
    }
    let confirmed = Confirm::with_theme(theme)
        .with_prompt(format!("Really delete '{service}'?"))
        .default(false)
        .interact()?;
    if !confirmed {
        println!("Deletion cancelled.");
        return Ok(());
    }
    if vault.delete(&service)? {
        println!("Deleted credential for '{service}'.");
    }
    Ok(())
}

fn search(vault: &Vault, theme: &ColorfulTheme) -> Result<()> {
    let query: String = Input::with_theme(theme)
        .with_prompt("Search for")
        .interact_text()?;
    commands::search(vault, &query)
}

fn generate_password(rules: &PasswordRules) -> Result<()> {
    let password = generate(rules)?;
    println!("Generated: {password}");
    clipboard::copy_with_notice(&password);
    Ok(())
}

fn prompt_service(theme: &ColorfulTheme) -> Result<String> {
    loop {
        let service: String = Input::with_theme(theme)
            .with_prompt("Service/website")
            .interact_text()?;
        let service = service.trim();
        if !service.is_empty() {
            return Ok(service.to_string());
        }
        eprintln!("Service name cannot be empty.");
    }
}

fn prompt_new_secret(
    theme: &ColorfulTheme,
    rules: &PasswordRules,
    options: &[&str],
) -> Result<String> {
    let pick = Select::with_theme(theme)
        .with_prompt("Secret")
        .items(options)
        .default(0)
        .interact()?;
    if pick == 1 {
        let secret = generate(rules)?;
        println!("Generated: {secret}");
        clipboard::copy_with_notice(&secret);
        Ok(secret)
    } else {
        Ok(Password::with_theme(theme)
            .with_prompt("Secret")
            .interact()?)
    }
}

/// `None` when the trimmed input is empty, so blank answers keep the
/// stored value.
fn not_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
