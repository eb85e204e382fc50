//! Block representation helpers.
//!
//! A block is 16 bytes addressed as a column-major 4×4 matrix:
//! `index = column * 4 + row`. Round keys use the same layout, so
//! AddRoundKey is a plain byte-wise XOR.

/// AES block of 16 bytes.
pub type Block = [u8; 16];

/// Length of an AES block in bytes.
pub const BLOCK_LEN: usize = 16;

/// XORs `rhs` into `dst` in place.
#[inline]
pub fn xor_in_place(dst: &mut Block, rhs: &Block) {
    for (d, r) in dst.iter_mut().zip(rhs.iter()) {
        *d ^= *r;
    }
}
