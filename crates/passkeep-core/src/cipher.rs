use thiserror::Error;

/// Errors produced by cipher implementations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// The plaintext could not be sealed.
    #[error("encryption failed")]
    Encrypt,
    /// The token was not produced under this key or has been altered.
    /// Wrong key, truncation and tampering are indistinguishable here.
    #[error("authentication failed: wrong key or corrupted data")]
    Authentication,
}

/// Authenticated symmetric encryption over opaque byte payloads.
///
/// Implementations must be authenticated: `decrypt` either returns the
/// exact plaintext that was sealed under the same key, or fails. It never
/// hands back garbage for a token it cannot verify.
pub trait SecretCipher {
    /// Seal plaintext into a self-contained token.
    ///
    /// Tokens embed whatever per-call material (nonce, tag) the cipher
    /// needs, so sealing the same plaintext twice yields different
    /// tokens.
    fn encrypt(&self, plaintext: &[u8]) -> Result<Vec<u8>, CipherError>;

    /// Open a token produced by [`SecretCipher::encrypt`] under the same
    /// key.
    fn decrypt(&self, token: &[u8]) -> Result<Vec<u8>, CipherError>;
}
