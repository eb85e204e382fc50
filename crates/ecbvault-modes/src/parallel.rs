//! Parallel whole-buffer ECB processing.
//!
//! ECB's per-block independence makes an in-memory buffer embarrassingly
//! parallel: disjoint block-aligned chunks are handed to scoped worker
//! threads sharing the immutable key schedule, with the scope acting as the
//! join barrier. A panicking worker propagates out of the scope and aborts
//! the whole operation. The streaming file path stays sequential; its carry
//! bytes and withheld last block are inherently ordered state.

use std::thread;

use aes_core::{crypt_block, Block, Direction, KeySchedule, BLOCK_LEN};

use crate::error::ModeError;

/// Minimum bytes handed to one worker.
const MIN_CHUNK: usize = 1 << 20;

/// Transforms a whole block-aligned buffer in place, fanning out across
/// worker threads for large inputs.
///
/// Output is byte-identical to [`crate::ecb::process_blocks`] over the same
/// buffer. Inputs at or below the chunk granularity are processed inline.
pub fn process_blocks_parallel(
    direction: Direction,
    buf: &mut [u8],
    schedule: &KeySchedule,
) -> Result<(), ModeError> {
    let len = buf.len();
    if len % BLOCK_LEN != 0 {
        return Err(ModeError::InvalidArgument(
            "buffer length must be a multiple of 16",
        ));
    }
    if len <= MIN_CHUNK {
        return crate::ecb::process_blocks(direction, buf, schedule, 0, len);
    }

    let workers = num_cpus::get().max(1);
    let per_worker = len.div_ceil(workers);
    // Round up to the block size so every chunk stays aligned.
    let chunk_len = per_worker.max(MIN_CHUNK).div_ceil(BLOCK_LEN) * BLOCK_LEN;

    thread::scope(|scope| {
        for chunk in buf.chunks_mut(chunk_len) {
            scope.spawn(move || {
                for block in chunk.chunks_exact_mut(BLOCK_LEN) {
                    let block: &mut Block =
                        block.try_into().expect("chunk is exactly one block");
                    crypt_block(direction, block, schedule);
                }
            });
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{RngCore, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn rejects_misaligned_buffers() {
        let ks = KeySchedule::new(&[0u8; 16]).unwrap();
        let mut buf = vec![0u8; 17];
        assert!(matches!(
            process_blocks_parallel(Direction::Encrypt, &mut buf, &ks),
            Err(ModeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn matches_sequential_output_on_large_buffers() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key);
        let ks = KeySchedule::new(&key).unwrap();

        // Larger than one chunk so the scoped-thread path actually runs.
        let mut buf = vec![0u8; 3 * (1 << 20) + 64];
        rng.fill_bytes(&mut buf);
        let mut expected = buf.clone();

        process_blocks_parallel(Direction::Encrypt, &mut buf, &ks).unwrap();
        let len = expected.len();
        crate::ecb::process_blocks(Direction::Encrypt, &mut expected, &ks, 0, len).unwrap();
        assert_eq!(buf, expected);

        process_blocks_parallel(Direction::Decrypt, &mut buf, &ks).unwrap();
        crate::ecb::process_blocks(Direction::Decrypt, &mut expected, &ks, 0, len).unwrap();
        assert_eq!(buf, expected);
    }

    #[test]
    fn small_buffers_round_trip_inline() {
        let ks = KeySchedule::new(&[9u8; 24]).unwrap();
        let mut buf = vec![0x5au8; 256];
        let original = buf.clone();
        process_blocks_parallel(Direction::Encrypt, &mut buf, &ks).unwrap();
        assert_ne!(buf, original);
        process_blocks_parallel(Direction::Decrypt, &mut buf, &ks).unwrap();
        assert_eq!(buf, original);
    }
}
