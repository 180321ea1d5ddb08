//! Master-password key derivation and the authenticated cipher built on
//! it. Tokens are AES-256-GCM, base64url on the wire, one fresh nonce per
//! seal.

pub mod key_derivation;
pub mod master_cipher;
