//! Error type for streaming and envelope operations.

use std::io;

use aes_core::KeyError;
use ecbvault_modes::ModeError;
use thiserror::Error;

/// Errors raised by the streaming processor and the authenticated envelope.
///
/// None of these are retryable: an integrity or format failure cannot be
/// remedied by running the operation again, and every failure aborts the
/// whole operation.
#[derive(Debug, Error)]
pub enum FileError {
    /// Underlying read/write failure.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// The supplied key could not be expanded.
    #[error(transparent)]
    Key(#[from] KeyError),
    /// Block-mode or padding failure (includes bad PKCS#7 padding).
    #[error(transparent)]
    Mode(#[from] ModeError),
    /// The ciphertext stream ended mid-block.
    #[error("truncated ciphertext: stream is not a whole number of blocks")]
    TruncatedCiphertext,
    /// The ciphertext stream contained no blocks at all; even empty
    /// plaintext encrypts to one full padded block.
    #[error("empty ciphertext")]
    EmptyCiphertext,
    /// The envelope header is structurally invalid.
    #[error("malformed envelope: {0}")]
    MalformedEnvelope(&'static str),
    /// The stored tag does not match the recomputed MAC (file modified or
    /// wrong key).
    #[error("authentication failed: tag mismatch")]
    AuthenticationFailure,
    /// Decrypted output disagrees with the length declared in the header.
    #[error("plaintext length mismatch: header declares {declared}, got {actual}")]
    LengthMismatch {
        /// Length recorded in the envelope header.
        declared: u64,
        /// Bytes actually produced by decryption.
        actual: u64,
    },
}
