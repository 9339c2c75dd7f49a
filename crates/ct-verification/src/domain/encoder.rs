//! # Canonical Buffer Encoding
//!
//! Reconstructs the fixed-size byte buffer a meter hashes before
//! signing. Every field occupies a fixed, non-overlapping byte range
//! determined solely by the format; integer fields are little-endian,
//! hex and text fields are written byte-for-byte.
//!
//! Each `set_*` operation writes the binary form AND returns the
//! canonical audit string of what was written, so one pass feeds both
//! the digest and the verification report. Malformed or oversized input
//! is an error, never a silent truncation.

use shared_types::ObisError;
use thiserror::Error;

/// Total size of a canonical record buffer. Trailing bytes past the
/// last field stay zero (reserved).
pub const BUFFER_SIZE: usize = 320;

/// Errors encoding a measurement record into its canonical buffer.
///
/// All of these collapse to the `UnknownCtrFormat` outcome on the
/// verification path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// A hex-encoded field value is not well-formed hex.
    #[error("Malformed hex value: {0}")]
    MalformedHex(String),

    /// The value needs more bytes than its field provides.
    #[error("Value of {len} bytes does not fit {width}-byte field at offset {offset}")]
    Overflow {
        /// Field offset in the buffer.
        offset: usize,
        /// Field width in bytes.
        width: usize,
        /// Length the value would need.
        len: usize,
    },

    /// A write would land outside the 320-byte buffer.
    #[error("Write outside buffer: offset {offset}, length {len}")]
    OutOfBounds {
        /// Requested offset.
        offset: usize,
        /// Requested length.
        len: usize,
    },

    /// Timestamp does not fit a 32-bit field.
    #[error("Timestamp out of 32-bit range: {0}")]
    TimestampOutOfRange(i64),

    /// The format requires a field this value does not carry.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// OBIS code could not be canonicalized.
    #[error(transparent)]
    Obis(#[from] ObisError),
}

/// A fixed 320-byte record buffer under construction.
///
/// One instance per verification or signing attempt; never reused
/// across attempts.
#[derive(Debug, Clone)]
pub struct CryptoBuffer {
    bytes: [u8; BUFFER_SIZE],
}

impl Default for CryptoBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoBuffer {
    /// Create a zeroed buffer.
    pub fn new() -> Self {
        Self {
            bytes: [0u8; BUFFER_SIZE],
        }
    }

    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Write raw bytes at `offset` into a field of `width` bytes.
    /// Returns the lowercase hex of the bytes written.
    pub fn set_bytes(
        &mut self,
        value: &[u8],
        offset: usize,
        width: usize,
    ) -> Result<String, EncodeError> {
        if value.len() > width {
            return Err(EncodeError::Overflow {
                offset,
                width,
                len: value.len(),
            });
        }
        if offset.checked_add(width).map_or(true, |end| end > BUFFER_SIZE) {
            return Err(EncodeError::OutOfBounds { offset, len: width });
        }
        self.bytes[offset..offset + value.len()].copy_from_slice(value);
        Ok(hex::encode(value))
    }

    /// Write a hex-encoded field. Strips an optional `0x` prefix; odd
    /// length or non-hex characters are malformed. `reverse` writes the
    /// bytes in little-endian order (for hex fields the firmware stores
    /// reversed, e.g. the pagination counter).
    pub fn set_hex(
        &mut self,
        hex_value: &str,
        offset: usize,
        width: usize,
        reverse: bool,
    ) -> Result<String, EncodeError> {
        let trimmed = hex_value.trim();
        let stripped = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
            .unwrap_or(trimmed);
        let mut bytes = hex::decode(stripped)
            .map_err(|_| EncodeError::MalformedHex(hex_value.to_string()))?;
        if reverse {
            bytes.reverse();
        }
        self.set_bytes(&bytes, offset, width)
    }

    /// Write a text field as UTF-8 bytes. Returns the text written.
    pub fn set_text(
        &mut self,
        text: &str,
        offset: usize,
        width: usize,
    ) -> Result<String, EncodeError> {
        self.set_bytes(text.as_bytes(), offset, width)?;
        Ok(text.to_string())
    }

    /// Write a Unix timestamp as a little-endian u32. Returns the
    /// decimal epoch seconds.
    pub fn set_timestamp32(
        &mut self,
        epoch_seconds: i64,
        offset: usize,
    ) -> Result<String, EncodeError> {
        let seconds = u32::try_from(epoch_seconds)
            .map_err(|_| EncodeError::TimestampOutOfRange(epoch_seconds))?;
        self.set_bytes(&seconds.to_le_bytes(), offset, 4)?;
        Ok(seconds.to_string())
    }

    /// Write a little-endian u32 field. Returns the decimal string.
    pub fn set_u32(&mut self, value: u32, offset: usize) -> Result<String, EncodeError> {
        self.set_bytes(&value.to_le_bytes(), offset, 4)?;
        Ok(value.to_string())
    }

    /// Write a signed 8-bit field. Returns the decimal string.
    pub fn set_i8(&mut self, value: i8, offset: usize) -> Result<String, EncodeError> {
        self.set_bytes(&value.to_le_bytes(), offset, 1)?;
        Ok(value.to_string())
    }

    /// Write a little-endian u64 field. Returns the decimal string.
    pub fn set_u64(&mut self, value: u64, offset: usize) -> Result<String, EncodeError> {
        self.set_bytes(&value.to_le_bytes(), offset, 8)?;
        Ok(value.to_string())
    }
}
