//! HMAC-authenticated binary envelope around the streaming ECB processor.
//!
//! Layout (big-endian): `MAGIC(8) || VERSION(1) || MODE(1) ||
//! PLAINTEXT_LEN(8) || TAG(32) || CIPHERTEXT`. The tag is HMAC-SHA-256 over
//! the header fields
//! followed by every ciphertext byte. On encryption a zero tag is written
//! first and patched in place once the stream completes, which is the one
//! spot that requires a seekable output.
//!
//! Verification is fail-closed: the header is validated before any
//! ciphertext is touched, and the tag is checked over the whole file before
//! any plaintext is produced.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use aes_core::KeySchedule;

use crate::error::FileError;
use crate::stream::{self, BUF_LEN};

type HmacSha256 = Hmac<Sha256>;

const MAGIC: [u8; 8] = *b"DRECBMAC";
const VERSION: u8 = 1;
const MODE_ECB: u8 = 0;

/// Length of the HMAC-SHA-256 tag.
pub const TAG_LEN: usize = 32;
/// Length of the authenticated header fields (magic, version, mode, length).
pub const FIELDS_LEN: usize = 8 + 1 + 1 + 8;
/// Total header length including the tag.
pub const HEADER_LEN: usize = FIELDS_LEN + TAG_LEN;

/// Domain-separation suffix hashed with the main key to form the MAC key,
/// keeping the cipher and MAC uses of one secret computationally
/// independent.
const MAC_KEY_SUFFIX: u8 = 0x02;

/// Parsed and validated envelope header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvelopeHeader {
    /// Format version (currently always 1).
    pub version: u8,
    /// Block-mode tag (currently always ECB).
    pub mode: u8,
    /// Plaintext length declared at encryption time.
    pub plaintext_len: u64,
    /// Stored HMAC-SHA-256 tag.
    pub tag: [u8; TAG_LEN],
}

impl EnvelopeHeader {
    /// Reads and validates the fixed header, without touching ciphertext.
    ///
    /// A consumer that only needs the plaintext length can stop after this.
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self, FileError> {
        let mut fields = [0u8; FIELDS_LEN];
        read_exact_or_malformed(reader, &mut fields)?;
        let mut tag = [0u8; TAG_LEN];
        read_exact_or_malformed(reader, &mut tag)?;

        if fields[..8] != MAGIC {
            return Err(FileError::MalformedEnvelope("bad magic"));
        }
        let version = fields[8];
        if version != VERSION {
            return Err(FileError::MalformedEnvelope("unsupported version"));
        }
        let mode = fields[9];
        if mode != MODE_ECB {
            return Err(FileError::MalformedEnvelope("unsupported mode"));
        }
        let plaintext_len = u64::from_be_bytes(
            fields[10..FIELDS_LEN]
                .try_into()
                .expect("length field is eight bytes"),
        );

        Ok(Self {
            version,
            mode,
            plaintext_len,
            tag,
        })
    }

    fn fields(&self) -> [u8; FIELDS_LEN] {
        encode_fields(self.plaintext_len)
    }
}

fn encode_fields(plaintext_len: u64) -> [u8; FIELDS_LEN] {
    let mut fields = [0u8; FIELDS_LEN];
    fields[..8].copy_from_slice(&MAGIC);
    fields[8] = VERSION;
    fields[9] = MODE_ECB;
    fields[10..].copy_from_slice(&plaintext_len.to_be_bytes());
    fields
}

fn read_exact_or_malformed<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<(), FileError> {
    reader.read_exact(buf).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            FileError::MalformedEnvelope("file smaller than header")
        } else {
            FileError::Io(err)
        }
    })
}

/// Derives the cipher schedule and the 32-byte MAC key from one main key.
///
/// The main key must be an exact AES key length; the MAC key is
/// `SHA-256(main_key || 0x02)`.
fn derive_keys(main_key: &[u8]) -> Result<(KeySchedule, [u8; TAG_LEN]), FileError> {
    let schedule = KeySchedule::new(main_key)?;
    let mut hasher = Sha256::new();
    hasher.update(main_key);
    hasher.update([MAC_KEY_SUFFIX]);
    Ok((schedule, hasher.finalize().into()))
}

fn new_mac(mac_key: &[u8; TAG_LEN]) -> HmacSha256 {
    HmacSha256::new_from_slice(mac_key).expect("HMAC accepts any key length")
}

/// Writer adapter that feeds every written byte into the MAC as well.
struct MacWriter<W: Write> {
    inner: W,
    mac: HmacSha256,
}

impl<W: Write> Write for MacWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.mac.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Writer adapter counting the bytes that pass through it.
struct CountingWriter<W: Write> {
    inner: W,
    written: u64,
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Encrypts `reader` into an authenticated envelope on `writer`.
///
/// `plaintext_len` must be the exact number of bytes `reader` will yield; it
/// is recorded in the header before any ciphertext exists, so it has to be
/// known up front. The tag placeholder is patched in place after the stream
/// completes, which is why the output must be seekable.
pub fn encrypt<R: Read, W: Write + Seek>(
    reader: R,
    plaintext_len: u64,
    mut writer: W,
    main_key: &[u8],
) -> Result<(), FileError> {
    let (schedule, mac_key) = derive_keys(main_key)?;
    let start = writer.stream_position()?;

    let fields = encode_fields(plaintext_len);
    writer.write_all(&fields)?;
    writer.write_all(&[0u8; TAG_LEN])?;

    let mut mac = new_mac(&mac_key);
    mac.update(&fields);

    let mut tee = MacWriter { inner: writer, mac };
    stream::encrypt_stream(reader, &mut tee, &schedule)?;
    let MacWriter { mut inner, mac } = tee;

    let tag = mac.finalize().into_bytes();
    inner.seek(SeekFrom::Start(start + FIELDS_LEN as u64))?;
    inner.write_all(&tag)?;
    inner.flush()?;
    Ok(())
}

/// Verifies and decrypts an envelope from `reader` into `writer`.
///
/// The header is validated first, then the tag is recomputed over the header
/// fields and the whole ciphertext (first pass) and compared in constant
/// time; only on success is the ciphertext streamed out as plaintext (second
/// pass, which is why the input must be seekable). As defense in depth the
/// decrypted byte count must equal the declared length.
pub fn decrypt<R: Read + Seek, W: Write>(
    mut reader: R,
    writer: W,
    main_key: &[u8],
) -> Result<(), FileError> {
    let (schedule, mac_key) = derive_keys(main_key)?;
    let start = reader.stream_position()?;

    let header = EnvelopeHeader::read_from(&mut reader)?;

    let mut mac = new_mac(&mac_key);
    mac.update(&header.fields());
    let mut buf = vec![0u8; BUF_LEN];
    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        mac.update(&buf[..n]);
    }
    mac.verify_slice(&header.tag)
        .map_err(|_| FileError::AuthenticationFailure)?;

    reader.seek(SeekFrom::Start(start + HEADER_LEN as u64))?;
    let mut counting = CountingWriter {
        inner: writer,
        written: 0,
    };
    stream::decrypt_stream(reader, &mut counting, &schedule)?;

    if counting.written != header.plaintext_len {
        return Err(FileError::LengthMismatch {
            declared: header.plaintext_len,
            actual: counting.written,
        });
    }
    Ok(())
}

/// Encrypts a file into an envelope, taking the plaintext length from file
/// metadata.
pub fn encrypt_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    main_key: &[u8],
) -> Result<(), FileError> {
    let input = File::open(input)?;
    let plaintext_len = input.metadata()?.len();
    let reader = BufReader::with_capacity(BUF_LEN, input);
    let writer = BufWriter::with_capacity(BUF_LEN, File::create(output)?);
    encrypt(reader, plaintext_len, writer, main_key)
}

/// Verifies and decrypts an envelope file.
pub fn decrypt_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    main_key: &[u8],
) -> Result<(), FileError> {
    let reader = BufReader::with_capacity(BUF_LEN, File::open(input)?);
    let writer = BufWriter::with_capacity(BUF_LEN, File::create(output)?);
    decrypt(reader, writer, main_key)
}

/// Reads just the envelope header of a file, e.g. to learn the plaintext
/// length without decrypting.
pub fn read_header(path: impl AsRef<Path>) -> Result<EnvelopeHeader, FileError> {
    let mut reader = BufReader::new(File::open(path)?);
    EnvelopeHeader::read_from(&mut reader)
}
