//! Random password generation with per-class guarantees: every enabled
//! character class contributes at least one character to the output.

use rand::{rngs::OsRng, seq::SliceRandom, Rng};
use thiserror::Error;

/// Shortest password the generator will produce.
pub const MIN_LENGTH: usize = 4;

const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const DIGITS: &[u8] = b"0123456789";
const SYMBOLS: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";

/// Rejected generation parameters.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("password length must be at least 4 characters, got {0}")]
    TooShort(usize),
    #[error("at least one character class must be enabled")]
    NoClasses,
}

/// Character-class composition for a generated password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordRules {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for PasswordRules {
    /// 16 characters drawing on every class.
    fn default() -> Self {
        Self {
            length: 16,
            uppercase: true,
            lowercase: true,
            digits: true,
            symbols: true,
        }
    }
}

/// Generate a random password honoring `rules`.
///
/// One slot is reserved per enabled class so each is represented at
/// least once; the rest is drawn from the union of the enabled pools and
/// the final order is shuffled so the reserved characters do not cluster
/// at the front. `MIN_LENGTH` is never below the number of classes, so
/// the reservation always fits.
pub fn generate(rules: &PasswordRules) -> Result<String, GeneratorError> {
    if rules.length < MIN_LENGTH {
        return Err(GeneratorError::TooShort(rules.length));
    }

    let enabled: Vec<&[u8]> = [
        (rules.uppercase, UPPERCASE),
        (rules.lowercase, LOWERCASE),
        (rules.digits, DIGITS),
        (rules.symbols, SYMBOLS),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, pool)| pool)
    .collect();
    if enabled.is_empty() {
        return Err(GeneratorError::NoClasses);
    }

    let mut rng = OsRng;
    let mut chars: Vec<char> = Vec::with_capacity(rules.length);
    for pool in &enabled {
        chars.push(pick(&mut rng, pool));
    }
    let union: Vec<u8> = enabled.concat();
    while chars.len() < rules.length {
        chars.push(pick(&mut rng, &union));
    }
    chars.shuffle(&mut rng);

    Ok(chars.into_iter().collect())
}

/// Convenience profile without symbols, for sites that reject
/// punctuation.
pub fn generate_simple(length: usize) -> Result<String, GeneratorError> {
    generate(&PasswordRules {
        length,
        symbols: false,
        ..PasswordRules::default()
    })
}

fn pick(rng: &mut OsRng, pool: &[u8]) -> char {
    // pools are pure ASCII, so the cast is lossless
    pool[rng.gen_range(0..pool.len())] as char
}
