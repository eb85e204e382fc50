//! ECB block processing: in-place transforms over block-aligned buffer
//! regions, plus whole-array pad-and-encrypt / decrypt-and-unpad helpers.
//!
//! ECB encrypts every block independently, so identical plaintext blocks
//! always yield identical ciphertext blocks. That weakness is inherent to
//! the mode and reproduced here unchanged.

use aes_core::{crypt_block, Block, Direction, KeySchedule, BLOCK_LEN};

use crate::error::ModeError;
use crate::padding;

/// Transforms the single block at `offset` in place.
pub fn process_block(
    direction: Direction,
    buf: &mut [u8],
    schedule: &KeySchedule,
    offset: usize,
) -> Result<(), ModeError> {
    let end = offset
        .checked_add(BLOCK_LEN)
        .filter(|&end| end <= buf.len())
        .ok_or(ModeError::InvalidArgument("block offset out of bounds"))?;
    let block: &mut Block = (&mut buf[offset..end])
        .try_into()
        .expect("window is exactly one block");
    crypt_block(direction, block, schedule);
    Ok(())
}

/// Transforms `len` bytes starting at `offset` in place, block by block.
///
/// `len` must be a multiple of 16 and the region must lie inside `buf`,
/// otherwise [`ModeError::InvalidArgument`] is returned.
pub fn process_blocks(
    direction: Direction,
    buf: &mut [u8],
    schedule: &KeySchedule,
    offset: usize,
    len: usize,
) -> Result<(), ModeError> {
    let end = offset
        .checked_add(len)
        .filter(|&end| end <= buf.len())
        .ok_or(ModeError::InvalidArgument("region out of bounds"))?;
    if len % BLOCK_LEN != 0 {
        return Err(ModeError::InvalidArgument(
            "region length must be a multiple of 16",
        ));
    }
    for chunk in buf[offset..end].chunks_exact_mut(BLOCK_LEN) {
        let block: &mut Block = chunk.try_into().expect("chunk is exactly one block");
        crypt_block(direction, block, schedule);
    }
    Ok(())
}

/// Whole-array convenience: encrypt pads with PKCS#7 then transforms,
/// decrypt requires block-aligned input and unpads after transforming.
pub fn crypt_bytes(
    direction: Direction,
    data: &[u8],
    schedule: &KeySchedule,
) -> Result<Vec<u8>, ModeError> {
    match direction {
        Direction::Encrypt => {
            let mut buf = data.to_vec();
            padding::pad(&mut buf);
            let len = buf.len();
            process_blocks(direction, &mut buf, schedule, 0, len)?;
            Ok(buf)
        }
        Direction::Decrypt => {
            if data.len() % BLOCK_LEN != 0 {
                return Err(ModeError::InvalidArgument(
                    "ciphertext length must be a multiple of 16",
                ));
            }
            let mut buf = data.to_vec();
            let len = buf.len();
            process_blocks(direction, &mut buf, schedule, 0, len)?;
            padding::unpad(&mut buf)?;
            Ok(buf)
        }
    }
}
