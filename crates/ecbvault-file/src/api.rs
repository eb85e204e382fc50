//! One-call entry points combining key handling with byte and file
//! processing.
//!
//! Raw keys of an exact AES length are used directly; anything else, and all
//! passphrases, are sized down with a single SHA-256 hash (a convenience,
//! not a hardened KDF).

use std::path::Path;

use aes_core::{Direction, KeySchedule, KeySize};
use ecbvault_modes::ecb;

use crate::error::FileError;
use crate::stream;

/// Whole-array processing with caller-supplied key bytes.
pub fn crypt_bytes(direction: Direction, data: &[u8], key: &[u8]) -> Result<Vec<u8>, FileError> {
    let schedule = KeySchedule::for_key(key);
    Ok(ecb::crypt_bytes(direction, data, &schedule)?)
}

/// Whole-array processing with key material sized to the requested key size.
pub fn crypt_bytes_sized(
    direction: Direction,
    data: &[u8],
    material: &[u8],
    size: KeySize,
) -> Result<Vec<u8>, FileError> {
    let schedule = KeySchedule::derive(material, size);
    Ok(ecb::crypt_bytes(direction, data, &schedule)?)
}

/// Whole-array processing with a passphrase.
pub fn crypt_bytes_passphrase(
    direction: Direction,
    data: &[u8],
    passphrase: &str,
    size: KeySize,
) -> Result<Vec<u8>, FileError> {
    let schedule = KeySchedule::from_passphrase(passphrase, size);
    Ok(ecb::crypt_bytes(direction, data, &schedule)?)
}

/// Streams one file into another with caller-supplied key bytes.
pub fn crypt_file(
    direction: Direction,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    key: &[u8],
) -> Result<(), FileError> {
    let schedule = KeySchedule::for_key(key);
    stream::process_file(direction, input, output, &schedule)
}

/// Streams one file into another with a passphrase.
pub fn crypt_file_passphrase(
    direction: Direction,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    passphrase: &str,
    size: KeySize,
) -> Result<(), FileError> {
    let schedule = KeySchedule::from_passphrase(passphrase, size);
    stream::process_file(direction, input, output, &schedule)
}
