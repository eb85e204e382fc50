//! Bounded-memory streaming ECB over arbitrary byte streams.
//!
//! Both directions hold one data buffer plus at most 15 carry bytes between
//! reads, and produce output byte-identical to whole-buffer processing.
//! Decryption additionally withholds the most recently decrypted block until
//! a successor block or end-of-stream classifies it, so the PKCS#7 pad is
//! only ever stripped from the true final block.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use aes_core::{Direction, KeySchedule, BLOCK_LEN};
use ecbvault_modes::{ecb, padding};

use crate::error::FileError;

/// Data buffer size for one read iteration, aligned down to a whole number
/// of blocks.
pub(crate) const BUF_LEN: usize = (64 * 1024) & !(BLOCK_LEN - 1);

/// Encrypts `reader` to `writer` in bounded memory.
///
/// Each iteration seeds the buffer with the previous carry, reads, encrypts
/// the largest block multiple in place, and stashes the remainder. The final
/// carry (0–15 true tail bytes) is PKCS#7-padded and encrypted at
/// end-of-stream, so the pad always reflects genuine end-of-data.
pub fn encrypt_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    schedule: &KeySchedule,
) -> Result<(), FileError> {
    let mut buf = vec![0u8; BUF_LEN];
    let mut carry = [0u8; BLOCK_LEN];
    let mut carry_len = 0usize;

    loop {
        buf[..carry_len].copy_from_slice(&carry[..carry_len]);
        let n = reader.read(&mut buf[carry_len..])?;
        if n == 0 {
            break;
        }

        let total = carry_len + n;
        let full = total & !(BLOCK_LEN - 1);
        let rem = total - full;

        if full != 0 {
            ecb::process_blocks(Direction::Encrypt, &mut buf, schedule, 0, full)?;
            writer.write_all(&buf[..full])?;
        }
        carry[..rem].copy_from_slice(&buf[full..total]);
        carry_len = rem;
    }

    let mut last = carry[..carry_len].to_vec();
    padding::pad(&mut last);
    let len = last.len();
    ecb::process_blocks(Direction::Encrypt, &mut last, schedule, 0, len)?;
    writer.write_all(&last)?;
    writer.flush()?;
    Ok(())
}

/// Decrypts `reader` to `writer` in bounded memory.
///
/// Fails with [`FileError::TruncatedCiphertext`] if the stream ends
/// mid-block and [`FileError::EmptyCiphertext`] if it held no blocks at all.
pub fn decrypt_stream<R: Read, W: Write>(
    mut reader: R,
    mut writer: W,
    schedule: &KeySchedule,
) -> Result<(), FileError> {
    let mut buf = vec![0u8; BUF_LEN];
    let mut carry = [0u8; BLOCK_LEN];
    let mut carry_len = 0usize;

    // Most recently decrypted block, withheld until we know whether it is
    // the last one and must be unpadded.
    let mut last_plain = [0u8; BLOCK_LEN];
    let mut has_last = false;

    loop {
        buf[..carry_len].copy_from_slice(&carry[..carry_len]);
        let n = reader.read(&mut buf[carry_len..])?;
        if n == 0 {
            break;
        }

        let total = carry_len + n;
        let full = total & !(BLOCK_LEN - 1);
        let rem = total - full;

        if full != 0 {
            ecb::process_blocks(Direction::Decrypt, &mut buf, schedule, 0, full)?;
            if has_last {
                writer.write_all(&last_plain)?;
            }
            writer.write_all(&buf[..full - BLOCK_LEN])?;
            last_plain.copy_from_slice(&buf[full - BLOCK_LEN..full]);
            has_last = true;
        }
        carry[..rem].copy_from_slice(&buf[full..total]);
        carry_len = rem;
    }

    if carry_len != 0 {
        return Err(FileError::TruncatedCiphertext);
    }
    if !has_last {
        return Err(FileError::EmptyCiphertext);
    }

    let mut tail = last_plain.to_vec();
    padding::unpad(&mut tail)?;
    writer.write_all(&tail)?;
    writer.flush()?;
    Ok(())
}

/// Streams one file into another through the requested direction, with
/// buffered I/O. Handles are released on every exit path.
pub fn process_file(
    direction: Direction,
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    schedule: &KeySchedule,
) -> Result<(), FileError> {
    let reader = BufReader::with_capacity(BUF_LEN, File::open(input)?);
    let writer = BufWriter::with_capacity(BUF_LEN, File::create(output)?);
    match direction {
        Direction::Encrypt => encrypt_stream(reader, writer, schedule),
        Direction::Decrypt => decrypt_stream(reader, writer, schedule),
    }
}
