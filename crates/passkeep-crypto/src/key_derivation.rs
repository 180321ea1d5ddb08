use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Length in bytes of a derived master key (AES-256).
pub const MASTER_KEY_LEN: usize = 32;

/// Derive the session key from the master password.
///
/// A single unsalted SHA-256 pass: the same password always yields the
/// same key, and nothing about the derivation is ever written anywhere.
/// There is no stored verifier either; a wrong password only shows up as
/// an authentication failure when the first token is opened.
pub fn derive_master_key(password: &str) -> Zeroizing<[u8; MASTER_KEY_LEN]> {
    let digest = Sha256::digest(password.as_bytes());
    Zeroizing::new(digest.into())
}
