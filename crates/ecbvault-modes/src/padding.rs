//! PKCS#7 padding for 16-byte blocks.

use aes_core::BLOCK_LEN;

use crate::error::ModeError;

/// Appends PKCS#7 padding in place.
///
/// The pad value is `16 - (len % 16)`; input that is already block-aligned
/// still gains a full block of `0x10`. Padding is therefore always 1–16
/// bytes and the padded length a positive multiple of 16, so unpadding is
/// always well-defined.
pub fn pad(data: &mut Vec<u8>) {
    let pad_len = BLOCK_LEN - (data.len() % BLOCK_LEN);
    data.resize(data.len() + pad_len, pad_len as u8);
}

/// Strips PKCS#7 padding in place.
///
/// The last byte declares the pad length `n`; fails with
/// [`ModeError::BadPadding`] unless the input is non-empty, `1 <= n <= 16`,
/// and all of the last `n` bytes equal `n`.
pub fn unpad(data: &mut Vec<u8>) -> Result<(), ModeError> {
    let len = data.len();
    let pad_len = match data.last() {
        Some(&byte) => byte as usize,
        None => return Err(ModeError::BadPadding),
    };
    if pad_len == 0 || pad_len > BLOCK_LEN || pad_len > len {
        return Err(ModeError::BadPadding);
    }
    if data[len - pad_len..].iter().any(|&byte| byte as usize != pad_len) {
        return Err(ModeError::BadPadding);
    }
    data.truncate(len - pad_len);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_partial_block() {
        let mut data: Vec<u8> = (0u8..14).collect();
        pad(&mut data);
        let mut expected: Vec<u8> = (0u8..14).collect();
        expected.extend_from_slice(&[0x02, 0x02]);
        assert_eq!(data, expected);
    }

    #[test]
    fn aligned_input_gains_a_full_block() {
        let mut data = vec![0xabu8; 16];
        pad(&mut data);
        assert_eq!(data.len(), 32);
        assert!(data[16..].iter().all(|&b| b == 0x10));
    }

    #[test]
    fn empty_input_pads_to_one_block_of_0x10() {
        let mut data = Vec::new();
        pad(&mut data);
        assert_eq!(data, vec![0x10u8; 16]);
    }

    #[test]
    fn unpad_inverts_pad() {
        for len in [0usize, 1, 15, 16, 17, 31, 32, 100] {
            let original: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let mut data = original.clone();
            pad(&mut data);
            assert_eq!(data.len() % 16, 0);
            assert!(!data.is_empty());
            unpad(&mut data).unwrap();
            assert_eq!(data, original, "round trip failed for length {len}");
        }
    }

    #[test]
    fn unpad_accepts_mid_block_padding() {
        let mut data = vec![
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x06, 0x06, 0x06, 0x06,
            0x06, 0x06,
        ];
        unpad(&mut data).unwrap();
        assert_eq!(data.len(), 10);
    }

    #[test]
    fn unpad_rejects_inconsistent_trailing_bytes() {
        let mut data = vec![0u8; 15];
        data.push(0x02); // declares two bytes, but data[14] is 0x00
        assert_eq!(unpad(&mut data), Err(ModeError::BadPadding));
    }

    #[test]
    fn unpad_rejects_empty_input() {
        let mut data = Vec::new();
        assert_eq!(unpad(&mut data), Err(ModeError::BadPadding));
    }

    #[test]
    fn unpad_rejects_zero_and_oversize_declarations() {
        let mut zero = vec![0u8; 16];
        assert_eq!(unpad(&mut zero), Err(ModeError::BadPadding));

        let mut oversize = vec![0x11u8; 16];
        assert_eq!(unpad(&mut oversize), Err(ModeError::BadPadding));

        let mut longer_than_input = vec![0x05u8; 3];
        assert_eq!(unpad(&mut longer_than_input), Err(ModeError::BadPadding));
    }
}
