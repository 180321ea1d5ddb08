//! Core types for passkeep: credential records and the cipher contract.
//! Kept deliberately small so every other crate can depend on it cheaply.

pub mod cipher;
pub mod record;
