//! ECB block mode and PKCS#7 padding over the `aes-core` engine.
//!
//! Provides in-place block/bulk processing at caller-supplied offsets, the
//! whole-array pad-and-encrypt / decrypt-and-unpad convenience, and an
//! optional parallel path for large in-memory buffers.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod ecb;
mod error;
pub mod padding;
pub mod parallel;

pub use crate::ecb::{crypt_bytes, process_block, process_blocks};
pub use crate::error::ModeError;
pub use crate::padding::{pad, unpad};
pub use crate::parallel::process_blocks_parallel;
