//! AES-128/192/256 block cipher engine, implemented from first principles.
//!
//! This crate mirrors the FIPS-197 specification and provides:
//! - GF(2^8) arithmetic and the precomputed lookup tables.
//! - Key schedule expansion for all three key sizes, plus a SHA-256
//!   key-sizing convenience for arbitrary key material.
//! - In-place single-block encryption and decryption.
//!
//! The implementation aims for clarity and testability rather than
//! constant-time guarantees; table-lookup substitution means it should not
//! be treated as side-channel hardened.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
pub mod gf;
mod key;
mod round;
pub mod tables;

pub use crate::block::{xor_in_place, Block, BLOCK_LEN};
pub use crate::cipher::{crypt_block, decrypt_block, encrypt_block, Direction};
pub use crate::key::{KeyError, KeySchedule, KeySize};
pub use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};
