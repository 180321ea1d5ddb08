//! Encrypted credential store: one file, one cipher token, the whole
//! record map re-encrypted and atomically rewritten on every mutation.

pub mod vault;
