//! Bounded-memory streaming ECB file processing and the HMAC-authenticated
//! envelope format.
//!
//! [`stream`] processes byte streams of any size with one buffer, a 16-byte
//! carry, and a withheld last block, producing output byte-identical to
//! whole-buffer processing. [`envelope`] wraps the stream in a tamper-evident
//! binary format: fixed header fields, an HMAC-SHA-256 tag over fields and
//! ciphertext, and fail-closed verification ordered strictly before any
//! plaintext is produced.
//!
//! A caveat of the streaming design: plaintext written out by a streaming
//! decrypt that later fails must be treated as untrusted and discarded by
//! the caller. The envelope avoids this by verifying the tag in a first
//! pass before decrypting at all.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod api;
pub mod envelope;
mod error;
pub mod stream;

pub use crate::envelope::{
    decrypt, decrypt_file, encrypt, encrypt_file, read_header, EnvelopeHeader, FIELDS_LEN,
    HEADER_LEN, TAG_LEN,
};
pub use crate::error::FileError;
pub use crate::stream::{decrypt_stream, encrypt_stream, process_file};
