//! Single-block encryption and decryption.

use crate::block::Block;
use crate::key::KeySchedule;
use crate::round::{
    add_round_key, inv_mix_columns, inv_shift_rows, inv_sub_bytes, mix_columns, shift_rows,
    sub_bytes,
};

/// Which way a transform runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Plaintext to ciphertext.
    Encrypt,
    /// Ciphertext to plaintext.
    Decrypt,
}

/// Encrypts one block in place with pre-expanded round keys.
pub fn encrypt_block(state: &mut Block, schedule: &KeySchedule) {
    let rounds = schedule.rounds();

    add_round_key(state, schedule.round_key(0));

    for round in 1..rounds {
        sub_bytes(state);
        shift_rows(state);
        mix_columns(state);
        add_round_key(state, schedule.round_key(round));
    }

    // Final round skips MixColumns.
    sub_bytes(state);
    shift_rows(state);
    add_round_key(state, schedule.round_key(rounds));
}

/// Decrypts one block in place with pre-expanded round keys.
pub fn decrypt_block(state: &mut Block, schedule: &KeySchedule) {
    let rounds = schedule.rounds();

    add_round_key(state, schedule.round_key(rounds));
    for round in (1..rounds).rev() {
        inv_shift_rows(state);
        inv_sub_bytes(state);
        add_round_key(state, schedule.round_key(round));
        inv_mix_columns(state);
    }
    inv_shift_rows(state);
    inv_sub_bytes(state);
    add_round_key(state, schedule.round_key(0));
}

/// Runs one block through the cipher in the requested direction.
#[inline]
pub fn crypt_block(direction: Direction, state: &mut Block, schedule: &KeySchedule) {
    match direction {
        Direction::Encrypt => encrypt_block(state, schedule),
        Direction::Decrypt => decrypt_block(state, schedule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::RngCore;

    // FIPS-197 Appendix C known-answer vectors: the same plaintext under the
    // 16/24/32-byte sequential keys.
    const PLAIN: &str = "00112233445566778899aabbccddeeff";
    const CIPHER_128: &str = "69c4e0d86a7b0430d8cdb78070b4c55a";
    const CIPHER_192: &str = "dda97ca4864cdfe06eaf70a0ec0d7191";
    const CIPHER_256: &str = "8ea2b7ca516745bfeafc49904b496089";

    fn sequential_key(len: usize) -> Vec<u8> {
        (0..len as u8).collect()
    }

    fn hex_block(s: &str) -> Block {
        hex::decode(s).unwrap().try_into().unwrap()
    }

    fn check_known_answer(key_len: usize, expected: &str) {
        let schedule = KeySchedule::new(&sequential_key(key_len)).unwrap();

        let mut state = hex_block(PLAIN);
        encrypt_block(&mut state, &schedule);
        assert_eq!(state, hex_block(expected), "encrypt KAT mismatch");

        decrypt_block(&mut state, &schedule);
        assert_eq!(state, hex_block(PLAIN), "decrypt KAT mismatch");
    }

    #[test]
    fn fips197_aes128_known_answer() {
        check_known_answer(16, CIPHER_128);
    }

    #[test]
    fn fips197_aes192_known_answer() {
        check_known_answer(24, CIPHER_192);
    }

    #[test]
    fn fips197_aes256_known_answer() {
        check_known_answer(32, CIPHER_256);
    }

    #[test]
    fn crypt_block_dispatches_on_direction() {
        let schedule = KeySchedule::new(&sequential_key(16)).unwrap();
        let mut state = hex_block(PLAIN);
        crypt_block(Direction::Encrypt, &mut state, &schedule);
        assert_eq!(state, hex_block(CIPHER_128));
        crypt_block(Direction::Decrypt, &mut state, &schedule);
        assert_eq!(state, hex_block(PLAIN));
    }

    #[test]
    fn encrypt_decrypt_round_trip_random() {
        let mut rng = rand::thread_rng();
        for key_len in [16usize, 24, 32] {
            for _ in 0..50 {
                let mut key = vec![0u8; key_len];
                let mut block = [0u8; 16];
                rng.fill_bytes(&mut key);
                rng.fill_bytes(&mut block);
                let schedule = KeySchedule::new(&key).unwrap();
                let mut state = block;
                encrypt_block(&mut state, &schedule);
                decrypt_block(&mut state, &schedule);
                assert_eq!(state, block);
            }
        }
    }
}
