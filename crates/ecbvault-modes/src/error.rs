//! Error type for block-mode and padding operations.

use thiserror::Error;

/// Errors raised by ECB processing and PKCS#7 padding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModeError {
    /// Out-of-bounds or misaligned buffer region.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
    /// The trailing bytes do not form consistent PKCS#7 padding.
    #[error("bad PKCS#7 padding")]
    BadPadding,
}
