//! Key schedule for AES-128/192/256.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::block::Block;
use crate::tables::{RCON, SBOX};

/// Upper bound on `Nr + 1` across all key sizes (AES-256 has 14 rounds).
const MAX_ROUND_KEYS: usize = 15;

/// Errors raised while building a key schedule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The supplied key is not 16, 24, or 32 bytes long.
    #[error("key must be 16, 24, or 32 bytes, got {0}")]
    InvalidKeyLength(usize),
}

/// Supported AES key sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Key length in bytes (16/24/32).
    pub const fn key_len(self) -> usize {
        match self {
            KeySize::Aes128 => 16,
            KeySize::Aes192 => 24,
            KeySize::Aes256 => 32,
        }
    }

    /// Number of rounds `Nr` (10/12/14).
    pub const fn rounds(self) -> usize {
        match self {
            KeySize::Aes128 => 10,
            KeySize::Aes192 => 12,
            KeySize::Aes256 => 14,
        }
    }

    /// Maps a raw key length onto a key size.
    pub fn from_key_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(KeySize::Aes128),
            24 => Some(KeySize::Aes192),
            32 => Some(KeySize::Aes256),
            _ => None,
        }
    }
}

/// Expanded round keys: `Nr + 1` blocks in the state's column-major layout.
///
/// Immutable after construction; a schedule can be shared read-only across
/// concurrent block operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeySchedule {
    rounds: usize,
    round_keys: [Block; MAX_ROUND_KEYS],
}

impl KeySchedule {
    /// Expands an exact-length key (16, 24, or 32 bytes).
    pub fn new(key: &[u8]) -> Result<Self, KeyError> {
        let size =
            KeySize::from_key_len(key.len()).ok_or(KeyError::InvalidKeyLength(key.len()))?;
        Ok(Self::expand(key, size))
    }

    /// Sizes arbitrary key material down to `size` by hashing with SHA-256
    /// and truncating.
    ///
    /// This is a key-sizing convenience, not a hardened KDF: a single
    /// unsalted hash offers no protection against brute-forcing weak
    /// passphrases.
    pub fn derive(material: &[u8], size: KeySize) -> Self {
        let digest = Sha256::digest(material);
        Self::expand(&digest[..size.key_len()], size)
    }

    /// Derives a schedule from a UTF-8 passphrase via [`KeySchedule::derive`].
    pub fn from_passphrase(passphrase: &str, size: KeySize) -> Self {
        Self::derive(passphrase.as_bytes(), size)
    }

    /// Builds a schedule for caller-supplied key bytes: exact-length keys are
    /// expanded directly, anything else is derived down to AES-128.
    pub fn for_key(key: &[u8]) -> Self {
        match Self::new(key) {
            Ok(schedule) => schedule,
            Err(_) => Self::derive(key, KeySize::Aes128),
        }
    }

    fn expand(key: &[u8], size: KeySize) -> Self {
        debug_assert_eq!(key.len(), size.key_len());
        let nk = key.len() / 4;
        let rounds = size.rounds();
        let total_words = 4 * (rounds + 1);

        let mut w = [0u32; 4 * MAX_ROUND_KEYS];
        for (i, chunk) in key.chunks_exact(4).enumerate() {
            let bytes: [u8; 4] = chunk.try_into().expect("chunk length is four");
            w[i] = u32::from_be_bytes(bytes);
        }

        for i in nk..total_words {
            let mut temp = w[i - 1];
            if i % nk == 0 {
                temp = sub_word(temp.rotate_left(8)) ^ (u32::from(RCON[i / nk - 1]) << 24);
            } else if nk == 8 && i % 8 == 4 {
                // AES-256 substitutes every fourth word without rotation;
                // omitting this step silently corrupts the schedule.
                temp = sub_word(temp);
            }
            w[i] = w[i - nk] ^ temp;
        }

        let mut round_keys = [[0u8; 16]; MAX_ROUND_KEYS];
        for (round, round_key) in round_keys.iter_mut().enumerate().take(rounds + 1) {
            for col in 0..4 {
                let offset = col * 4;
                round_key[offset..offset + 4].copy_from_slice(&w[round * 4 + col].to_be_bytes());
            }
        }

        Self { rounds, round_keys }
    }

    /// Number of rounds `Nr` for this schedule.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Returns the round key for `round`.
    ///
    /// # Panics
    ///
    /// Panics if `round > self.rounds()`.
    #[inline]
    pub fn round_key(&self, round: usize) -> &Block {
        assert!(round <= self.rounds, "round key index out of range");
        &self.round_keys[round]
    }
}

fn sub_word(word: u32) -> u32 {
    let bytes = word.to_be_bytes();
    u32::from_be_bytes([
        SBOX[bytes[0] as usize],
        SBOX[bytes[1] as usize],
        SBOX[bytes[2] as usize],
        SBOX[bytes[3] as usize],
    ])
}
