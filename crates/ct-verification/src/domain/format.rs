//! # Vendor Format Descriptors
//!
//! Each supported meter firmware fixes a canonical buffer layout, a
//! curve (and with it the digest truncation length) and the set of
//! optional fields it serializes. The variants differ only in
//! configuration; the provider runs one generic path over a descriptor.

use shared_crypto::EcdsaCurve;

/// Fixed field offsets of the 320-byte canonical buffer.
///
/// These are a bit-for-bit compatibility contract with the meter
/// firmware; they are determined solely by the format, never by
/// runtime data.
pub mod layout {
    /// Meter identifier, 10 bytes.
    pub const METER_ID: usize = 0;
    /// Width of the meter identifier field.
    pub const METER_ID_WIDTH: usize = 10;
    /// Measurement timestamp, 4 bytes LE.
    pub const TIMESTAMP: usize = 10;
    /// Meter status word, 1 byte (richer variant only).
    pub const INFO_STATUS: usize = 14;
    /// Width of the status word field.
    pub const INFO_STATUS_WIDTH: usize = 1;
    /// Seconds counter, 4 bytes LE (richer variant only).
    pub const SECONDS_INDEX: usize = 15;
    /// Pagination counter, 4 bytes, hex stored LE (richer variant only).
    pub const PAGINATION_ID: usize = 19;
    /// Width of the pagination field.
    pub const PAGINATION_WIDTH: usize = 4;
    /// OBIS code, 6 bytes.
    pub const OBIS: usize = 23;
    /// Encoded unit, 1 byte signed.
    pub const UNIT: usize = 29;
    /// Scale exponent, 1 byte signed.
    pub const SCALE: usize = 30;
    /// Raw value, 8 bytes LE.
    pub const VALUE: usize = 31;
    /// Log book index, 2 bytes (richer variant only).
    pub const LOG_BOOK: usize = 39;
    /// Width of the log book field.
    pub const LOG_BOOK_WIDTH: usize = 2;
    /// Authorization identifier, up to 128 bytes.
    pub const AUTH_ID: usize = 41;
    /// Width of the authorization identifier region.
    pub const AUTH_ID_WIDTH: usize = 128;
    /// Authorization timestamp, 4 bytes LE.
    pub const AUTH_TIMESTAMP: usize = 169;
}

/// How a string field is serialized into the buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldEncoding {
    /// Hex-decoded and written byte-for-byte.
    Hex,
    /// UTF-8 bytes written as-is.
    Text,
}

/// A supported vendor meter-firmware format.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VendorFormat {
    /// EMH EDL-class firmware: secp192r1, 24-byte digest truncation,
    /// carries status/seconds/pagination/log-book fields.
    Emh,
    /// GDF-class firmware: secp256r1, full SHA-256 digest, minimal
    /// field set.
    Gdf,
}

impl VendorFormat {
    /// Select the format from a measurement's signature algorithm
    /// descriptor, e.g. `"ECC secp192r1"`. Unknown algorithms have no
    /// format and cannot be verified.
    pub fn from_algorithm(algorithm: &str) -> Option<Self> {
        let lower = algorithm.to_ascii_lowercase();
        if lower.contains("secp192r1") {
            Some(Self::Emh)
        } else if lower.contains("secp256r1") {
            Some(Self::Gdf)
        } else {
            None
        }
    }

    /// The format's descriptor.
    pub const fn descriptor(self) -> &'static FormatDescriptor {
        match self {
            Self::Emh => &EMH_DESCRIPTOR,
            Self::Gdf => &GDF_DESCRIPTOR,
        }
    }
}

/// Configuration a vendor format fixes: curve, per-field encodings and
/// the optional-field set. Offsets are shared (see [`layout`]).
#[derive(Debug)]
pub struct FormatDescriptor {
    /// The vendor format this descriptor belongs to.
    pub format: VendorFormat,
    /// Curve used for signatures; also fixes digest truncation.
    pub curve: EcdsaCurve,
    /// Serialization of the meter identifier field.
    pub meter_id_encoding: FieldEncoding,
    /// Serialization of the authorization identifier field.
    pub authorization_id_encoding: FieldEncoding,
    /// Whether the layout carries the info-status, seconds-index,
    /// pagination and log-book fields.
    pub carries_status_fields: bool,
}

static EMH_DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: VendorFormat::Emh,
    curve: EcdsaCurve::NistP192,
    meter_id_encoding: FieldEncoding::Text,
    authorization_id_encoding: FieldEncoding::Text,
    carries_status_fields: true,
};

static GDF_DESCRIPTOR: FormatDescriptor = FormatDescriptor {
    format: VendorFormat::Gdf,
    curve: EcdsaCurve::NistP256,
    meter_id_encoding: FieldEncoding::Hex,
    authorization_id_encoding: FieldEncoding::Hex,
    carries_status_fields: false,
};
