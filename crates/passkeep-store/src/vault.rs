use std::{
    collections::BTreeMap,
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use passkeep_core::{
    cipher::{CipherError, SecretCipher},
    record::{CredentialRecord, RecordPatch},
};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, instrument};

/// Errors produced by the credential vault.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The storage file exists but could not be opened with this
    /// password. Wrong password and corrupted file are deliberately one
    /// condition; the caller cannot tell them apart and should not try.
    #[error("unable to open vault: wrong master password or corrupted storage file")]
    Load,
    /// Filesystem failure while reading or persisting the vault.
    #[error("vault i/o failed: {0}")]
    Io(#[from] std::io::Error),
    /// The record map could not be serialized.
    #[error("vault encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
    /// The cipher rejected an operation outside of load.
    #[error(transparent)]
    Cipher(#[from] CipherError),
}

/// Encrypted credential store backed by a single file.
///
/// The whole record map is decrypted once at open and re-encrypted and
/// atomically rewritten after every successful mutation, so the file
/// always holds exactly the state the last returned `Ok` reported. When
/// a persist fails the in-memory map keeps its pre-mutation state too.
///
/// Records are keyed by the lowercased service name; the display casing
/// lives inside each record.
#[derive(Debug)]
pub struct CredentialVault<C: SecretCipher> {
    path: PathBuf,
    cipher: C,
    records: BTreeMap<String, CredentialRecord>,
}

impl<C: SecretCipher> CredentialVault<C> {
    /// Open the vault at `path`.
    ///
    /// A missing file and a zero-length file both mean an empty vault;
    /// neither creates the file, which only appears on the first
    /// mutation. Any decryption or deserialization failure surfaces as
    /// [`VaultError::Load`].
    pub fn open(path: impl Into<PathBuf>, cipher: C) -> Result<Self, VaultError> {
        let path = path.into();
        let records = load_records(&path, &cipher)?;
        debug!(records = records.len(), path = %path.display(), "vault opened");
        Ok(Self {
            path,
            cipher,
            records,
        })
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a credential by service name, case-insensitively.
    pub fn get(&self, service: &str) -> Option<&CredentialRecord> {
        self.records.get(&normalize(service))
    }

    /// Store a new credential.
    ///
    /// Returns `Ok(false)` without touching memory or disk when a record
    /// for the same (case-normalized) service already exists.
    #[instrument(skip_all, fields(service = %service))]
    pub fn add(
        &mut self,
        service: &str,
        username: &str,
        secret: &str,
        notes: &str,
    ) -> Result<bool, VaultError> {
        let key = normalize(service);
        if self.records.contains_key(&key) {
            return Ok(false);
        }
        let mut next = self.records.clone();
        next.insert(key, CredentialRecord::new(service, username, secret, notes));
        self.commit(next)?;
        debug!("credential added");
        Ok(true)
    }

    /// Apply a partial update to an existing credential.
    ///
    /// `None` fields keep their current value. `modified_at` is
    /// refreshed whenever the service exists, even for an all-`None`
    /// patch, and the vault is re-persisted.
    #[instrument(skip_all, fields(service = %service))]
    pub fn update(&mut self, service: &str, patch: RecordPatch) -> Result<bool, VaultError> {
        let key = normalize(service);
        let mut next = self.records.clone();
        match next.get_mut(&key) {
            Some(record) => {
                if let Some(username) = patch.username {
                    record.username = username;
                }
                if let Some(secret) = patch.secret {
                    record.secret = secret;
                }
                if let Some(notes) = patch.notes {
                    record.notes = notes;
                }
                record.modified_at = Utc::now();
            }
            None => return Ok(false),
        }
        self.commit(next)?;
        debug!("credential updated");
        Ok(true)
    }

    /// Remove a credential. Returns `Ok(false)` when the service is
    /// absent.
    #[instrument(skip_all, fields(service = %service))]
    pub fn delete(&mut self, service: &str) -> Result<bool, VaultError> {
        let key = normalize(service);
        let mut next = self.records.clone();
        if next.remove(&key).is_none() {
            return Ok(false);
        }
        self.commit(next)?;
        debug!("credential deleted");
        Ok(true)
    }

    /// All records whose service or username contains `query`,
    /// case-insensitively. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&CredentialRecord> {
        let needle = query.to_lowercase();
        self.records
            .values()
            .filter(|record| {
                record.service.to_lowercase().contains(&needle)
                    || record.username.to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Display-form service names, in normalized-key order.
    pub fn list_services(&self) -> Vec<&str> {
        self.records
            .values()
            .map(|record| record.service.as_str())
            .collect()
    }

    /// All records, in normalized-key order.
    pub fn records(&self) -> impl Iterator<Item = &CredentialRecord> {
        self.records.values()
    }

    /// Serialize and encrypt `next`, atomically replace the storage
    /// file, and only then adopt `next` as the in-memory state.
    fn commit(&mut self, next: BTreeMap<String, CredentialRecord>) -> Result<(), VaultError> {
        let plaintext = serde_json::to_vec(&next)?;
        let token = self.cipher.encrypt(&plaintext)?;
        write_atomic(&self.path, &token)?;
        self.records = next;
        Ok(())
    }
}

/// Case-folded map key; the display form stays inside the record.
fn normalize(service: &str) -> String {
    service.to_lowercase()
}

fn load_records<C: SecretCipher>(
    path: &Path,
    cipher: &C,
) -> Result<BTreeMap<String, CredentialRecord>, VaultError> {
    let token = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(err) => return Err(err.into()),
    };
    if token.is_empty() {
        return Ok(BTreeMap::new());
    }
    let plaintext = cipher.decrypt(&token).map_err(|_| VaultError::Load)?;
    serde_json::from_slice(&plaintext).map_err(|_| VaultError::Load)
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), VaultError> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|err| VaultError::Io(err.error))?;
    Ok(())
}
