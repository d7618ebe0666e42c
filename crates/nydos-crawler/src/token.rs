//! Random search tokens.
//!
//! A token is three letters drawn independently and uniformly from `A-Z` using the
//! operating system's CSPRNG, then lower-cased. The registry treats it as a
//! name-contains filter.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::TokenError;

/// Source alphabet.
pub const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Number of characters in a token.
pub const TOKEN_LEN: usize = 3;

/// Number of distinct tokens (26^3).
pub const TOKEN_SPACE: usize = 26 * 26 * 26;

/// Largest multiple of 26 representable in a byte; bytes at or above it are rejected.
const REJECT_FROM: u8 = 234;

/// A validated three-letter lowercase search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SearchToken([u8; TOKEN_LEN]);

impl SearchToken {
    /// Borrow the token as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Only ASCII a-z is ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchToken {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != TOKEN_LEN || !bytes.iter().all(u8::is_ascii_alphabetic) {
            return Err(TokenError::invalid(s));
        }
        let mut token = [0u8; TOKEN_LEN];
        for (slot, b) in token.iter_mut().zip(bytes) {
            *slot = b.to_ascii_lowercase();
        }
        Ok(Self(token))
    }
}

impl TryFrom<&str> for SearchToken {
    type Error = TokenError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Generate a token from the OS entropy source.
pub fn generate_token() -> Result<SearchToken, TokenError> {
    generate_token_with(&mut OsRng)
}

/// Generate a token from the given random source.
///
/// Letters are picked by rejection sampling over raw bytes so every letter has
/// probability exactly 1/26. A failing source yields an error, never a partial token.
pub fn generate_token_with<R: RngCore + ?Sized>(rng: &mut R) -> Result<SearchToken, TokenError> {
    let mut token = [0u8; TOKEN_LEN];
    let mut filled = 0;
    let mut buf = [0u8; 8];

    while filled < TOKEN_LEN {
        rng.try_fill_bytes(&mut buf)?;
        for &b in buf.iter().filter(|&&b| b < REJECT_FROM) {
            if filled == TOKEN_LEN {
                break;
            }
            token[filled] = ALPHABET[usize::from(b % 26)].to_ascii_lowercase();
            filled += 1;
        }
    }

    Ok(SearchToken(token))
}

/// Random source that always fails.
#[cfg(test)]
pub(crate) struct BrokenRng;

#[cfg(test)]
impl RngCore for BrokenRng {
    fn next_u32(&mut self) -> u32 {
        0
    }

    fn next_u64(&mut self) -> u64 {
        0
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), rand::Error> {
        Err(rand::Error::new(std::io::Error::other("entropy pool unavailable")))
    }
}
