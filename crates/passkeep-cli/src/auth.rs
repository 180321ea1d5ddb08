//! Master-password acquisition and vault unlocking.
//!
//! The password comes from `PASSKEEP_MASTER_PASSWORD` when set (headless
//! use), otherwise from an interactive prompt. The vault file itself is
//! the only verifier: a wrong password surfaces as a load failure on the
//! first decrypt.

use std::path::Path;

use color_eyre::{eyre::eyre, Result};
use dialoguer::{theme::ColorfulTheme, Password};
use passkeep_crypto::master_cipher::MasterCipher;
use passkeep_store::vault::{CredentialVault, VaultError};
use secrecy::{ExposeSecret, SecretString};

/// Environment variable consulted before prompting.
pub const MASTER_PASSWORD_ENV: &str = "PASSKEEP_MASTER_PASSWORD";

/// Shortest master password accepted when creating a vault.
const MIN_MASTER_LEN: usize = 6;

/// Unlock attempts before giving up on an existing vault.
const MAX_ATTEMPTS: u32 = 3;

/// Open the vault at `path`, driving first-run setup or unlock prompts
/// as needed.
pub fn open_vault(path: &Path) -> Result<CredentialVault<MasterCipher>> {
    if let Some(password) = env_password() {
        return unlock(path, &password).map_err(Into::into);
    }
    if path.exists() {
        unlock_interactive(path)
    } else {
        create_interactive(path)
    }
}

fn env_password() -> Option<SecretString> {
    std::env::var(MASTER_PASSWORD_ENV)
        .ok()
        .filter(|value| !value.is_empty())
        .map(SecretString::from)
}

fn unlock(path: &Path, password: &SecretString) -> Result<CredentialVault<MasterCipher>, VaultError> {
    CredentialVault::open(path, MasterCipher::derive(password.expose_secret()))
}

fn unlock_interactive(path: &Path) -> Result<CredentialVault<MasterCipher>> {
    let theme = ColorfulTheme::default();
    for attempt in 1..=MAX_ATTEMPTS {
        let password = SecretString::from(
            Password::with_theme(&theme)
                .with_prompt("Master password")
                .interact()?,
        );
        match unlock(path, &password) {
            Ok(vault) => return Ok(vault),
            Err(VaultError::Load) => {
                let remaining = MAX_ATTEMPTS - attempt;
                if remaining > 0 {
                    eprintln!("Wrong master password. {remaining} attempt(s) remaining.");
                }
            }
            Err(err) => return Err(err.into()),
        }
    }
    Err(eyre!("too many failed unlock attempts"))
}

fn create_interactive(path: &Path) -> Result<CredentialVault<MasterCipher>> {
    println!("No vault found at {}.", path.display());
    println!("Choose a master password. There is no recovery if you forget it.");
    let theme = ColorfulTheme::default();
    loop {
        let password = SecretString::from(
            Password::with_theme(&theme)
                .with_prompt("Create master password")
                .with_confirmation("Confirm master password", "Passwords do not match")
                .interact()?,
        );
        if password.expose_secret().chars().count() < MIN_MASTER_LEN {
            eprintln!("Master password must be at least {MIN_MASTER_LEN} characters long.");
            continue;
        }
        return unlock(path, &password).map_err(Into::into);
    }
}
