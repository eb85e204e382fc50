//! AES round transformations, in place over one 16-byte state.

use crate::block::{xor_in_place, Block};
use crate::gf::{mul2, mul3};
use crate::tables::{INV_SBOX, MUL11, MUL13, MUL14, MUL9, SBOX};

/// Applies SubBytes to the state in place.
#[inline]
pub fn sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

/// Applies the inverse SubBytes transformation.
#[inline]
pub fn inv_sub_bytes(state: &mut Block) {
    for byte in state.iter_mut() {
        *byte = INV_SBOX[*byte as usize];
    }
}

// The state is column-major (index = col * 4 + row), so row r of column c
// lives at c * 4 + r. ShiftRows rotates row r left by r positions.

/// Performs ShiftRows in place.
#[inline]
pub fn shift_rows(state: &mut Block) {
    let mut rotated = [0u8; 16];
    for col in 0..4 {
        for row in 0..4 {
            rotated[col * 4 + row] = state[((col + row) % 4) * 4 + row];
        }
    }
    *state = rotated;
}

/// Performs the inverse of ShiftRows in place (row r rotated right by r).
#[inline]
pub fn inv_shift_rows(state: &mut Block) {
    let mut rotated = [0u8; 16];
    for col in 0..4 {
        for row in 0..4 {
            rotated[((col + row) % 4) * 4 + row] = state[col * 4 + row];
        }
    }
    *state = rotated;
}

/// MixColumns over all four columns, via ×2/×3 combinations of the fixed
/// MDS matrix.
#[inline]
pub fn mix_columns(state: &mut Block) {
    for col in 0..4 {
        let idx = col * 4;
        let [a0, a1, a2, a3] = [state[idx], state[idx + 1], state[idx + 2], state[idx + 3]];
        state[idx] = mul2(a0) ^ mul3(a1) ^ a2 ^ a3;
        state[idx + 1] = a0 ^ mul2(a1) ^ mul3(a2) ^ a3;
        state[idx + 2] = a0 ^ a1 ^ mul2(a2) ^ mul3(a3);
        state[idx + 3] = mul3(a0) ^ a1 ^ a2 ^ mul2(a3);
    }
}

/// Inverse MixColumns over all four columns, via the precomputed
/// ×9/×11/×13/×14 tables.
#[inline]
pub fn inv_mix_columns(state: &mut Block) {
    for col in 0..4 {
        let idx = col * 4;
        let [a0, a1, a2, a3] = [
            state[idx] as usize,
            state[idx + 1] as usize,
            state[idx + 2] as usize,
            state[idx + 3] as usize,
        ];
        state[idx] = MUL14[a0] ^ MUL11[a1] ^ MUL13[a2] ^ MUL9[a3];
        state[idx + 1] = MUL9[a0] ^ MUL14[a1] ^ MUL11[a2] ^ MUL13[a3];
        state[idx + 2] = MUL13[a0] ^ MUL9[a1] ^ MUL14[a2] ^ MUL11[a3];
        state[idx + 3] = MUL11[a0] ^ MUL13[a1] ^ MUL9[a2] ^ MUL14[a3];
    }
}

/// Adds (XORs) a round key into the state.
#[inline]
pub fn add_round_key(state: &mut Block, round_key: &Block) {
    xor_in_place(state, round_key);
}

#[cfg(test)]
mod tests {
    use super::*;

    // FIPS-197 Appendix B, round 1 of the example cipher: each sub-step's
    // input and output state.
    const ROUND1_START: [u8; 16] = [
        0x19, 0x3d, 0xe3, 0xbe, 0xa0, 0xf4, 0xe2, 0x2b, 0x9a, 0xc6, 0x8d, 0x2a, 0xe9, 0xf8, 0x48,
        0x08,
    ];
    const AFTER_SUB_BYTES: [u8; 16] = [
        0xd4, 0x27, 0x11, 0xae, 0xe0, 0xbf, 0x98, 0xf1, 0xb8, 0xb4, 0x5d, 0xe5, 0x1e, 0x41, 0x52,
        0x30,
    ];
    const AFTER_SHIFT_ROWS: [u8; 16] = [
        0xd4, 0xbf, 0x5d, 0x30, 0xe0, 0xb4, 0x52, 0xae, 0xb8, 0x41, 0x11, 0xf1, 0x1e, 0x27, 0x98,
        0xe5,
    ];
    const AFTER_MIX_COLUMNS: [u8; 16] = [
        0x04, 0x66, 0x81, 0xe5, 0xe0, 0xcb, 0x19, 0x9a, 0x48, 0xf8, 0xd3, 0x7a, 0x28, 0x06, 0x26,
        0x4c,
    ];

    #[test]
    fn sub_bytes_matches_fips_fixture() {
        let mut state = ROUND1_START;
        sub_bytes(&mut state);
        assert_eq!(state, AFTER_SUB_BYTES);
    }

    #[test]
    fn inv_sub_bytes_matches_fips_fixture() {
        let mut state = AFTER_SUB_BYTES;
        inv_sub_bytes(&mut state);
        assert_eq!(state, ROUND1_START);
    }

    #[test]
    fn shift_rows_matches_fips_fixture() {
        let mut state = AFTER_SUB_BYTES;
        shift_rows(&mut state);
        assert_eq!(state, AFTER_SHIFT_ROWS);
    }

    #[test]
    fn inv_shift_rows_matches_fips_fixture() {
        let mut state = AFTER_SHIFT_ROWS;
        inv_shift_rows(&mut state);
        assert_eq!(state, AFTER_SUB_BYTES);
    }

    #[test]
    fn mix_columns_matches_fips_fixture() {
        let mut state = AFTER_SHIFT_ROWS;
        mix_columns(&mut state);
        assert_eq!(state, AFTER_MIX_COLUMNS);
    }

    #[test]
    fn inv_mix_columns_matches_fips_fixture() {
        let mut state = AFTER_MIX_COLUMNS;
        inv_mix_columns(&mut state);
        assert_eq!(state, AFTER_SHIFT_ROWS);
    }

    #[test]
    fn add_round_key_is_self_inverse() {
        let original: Block = core::array::from_fn(|i| i as u8);
        let round_key: Block = core::array::from_fn(|i| (15 - i) as u8);
        let mut state = original;
        add_round_key(&mut state, &round_key);
        assert_eq!(state, [0x0f; 16]);
        add_round_key(&mut state, &round_key);
        assert_eq!(state, original);
    }

    #[test]
    fn round_steps_invert_on_random_states() {
        use rand::RngCore;
        let mut rng = rand::thread_rng();
        for _ in 0..100 {
            let mut state = [0u8; 16];
            rng.fill_bytes(&mut state);
            let original = state;

            sub_bytes(&mut state);
            inv_sub_bytes(&mut state);
            assert_eq!(state, original);

            shift_rows(&mut state);
            inv_shift_rows(&mut state);
            assert_eq!(state, original);

            mix_columns(&mut state);
            inv_mix_columns(&mut state);
            assert_eq!(state, original);
        }
    }
}
