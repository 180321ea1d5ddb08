use aes_gcm::{
    aead::{Aead, AeadCore, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use passkeep_core::cipher::{CipherError, SecretCipher};

use crate::key_derivation::derive_master_key;

/// AES-GCM nonce length in bytes.
const NONCE_LEN: usize = 12;

/// Authenticated cipher keyed from the master password.
///
/// A token is `base64url(nonce || ciphertext || tag)` with no framing
/// around it, so a storage file holds exactly one token and nothing
/// else. The nonce is drawn fresh from the OS RNG on every seal.
pub struct MasterCipher {
    cipher: Aes256Gcm,
}

impl std::fmt::Debug for MasterCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterCipher").finish_non_exhaustive()
    }
}

impl MasterCipher {
    /// Build the cipher for this session from the master password.
    pub fn derive(password: &str) -> Self {
        let key = derive_master_key(password);
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_slice()));
        Self { cipher }
    }
}

impl SecretCipher for MasterCipher {
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| CipherError::Encrypt)?;

        let mut raw = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        raw.extend_from_slice(nonce.as_slice());
        raw.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(raw).into_bytes())
    }

    fn decrypt(&self, token: &[u8]) -> Result<Vec<u8>, CipherError> {
        // Every malformation maps to Authentication so callers cannot
        // tell a corrupted token from a wrong key.
        let raw = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|_| CipherError::Authentication)?;
        if raw.len() < NONCE_LEN {
            return Err(CipherError::Authentication);
        }
        let (nonce, ciphertext) = raw.split_at(NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CipherError::Authentication)
    }
}
