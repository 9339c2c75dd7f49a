//! # OBIS Codes
//!
//! Canonicalization of OBIS identifiers (IEC 62056-6-1) into the 6-byte
//! form the meter firmware serializes.
//!
//! Session documents carry OBIS codes either as 12 hex digits
//! (`"0101010800ff"`) or in dotted display notation (`"1-1:1.8.0"`).
//! Both map to the six value groups A..F; the dotted form leaves E
//! implicit between C and D separators and fixes F to `0xff`.

use thiserror::Error;

/// Errors canonicalizing an OBIS identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObisError {
    /// Neither valid hex nor valid dotted notation.
    #[error("Malformed OBIS code: {0}")]
    Malformed(String),
    /// A value group exceeds one byte.
    #[error("OBIS value group out of range in: {0}")]
    GroupOutOfRange(String),
}

/// Canonicalize an OBIS code into its 6-byte form.
///
/// Accepts `"0101010800ff"` (hex, case-insensitive) or `"1-1:1.8.0"`
/// (dotted `A-B:C.D.E`, F implied as `0xff`).
pub fn obis_bytes(obis: &str) -> Result<[u8; 6], ObisError> {
    let trimmed = obis.trim();

    if trimmed.len() == 12 && trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        let mut out = [0u8; 6];
        for (i, chunk) in out.iter_mut().enumerate() {
            let pair = &trimmed[i * 2..i * 2 + 2];
            *chunk = u8::from_str_radix(pair, 16)
                .map_err(|_| ObisError::Malformed(obis.to_string()))?;
        }
        return Ok(out);
    }

    parse_dotted(trimmed, obis)
}

/// Parse dotted `A-B:C.D.E` notation. Numeric groups above 255 are
/// reported as out of range rather than malformed.
fn parse_dotted(s: &str, original: &str) -> Result<[u8; 6], ObisError> {
    let malformed = || ObisError::Malformed(original.to_string());

    let (a, rest) = s.split_once('-').ok_or_else(malformed)?;
    let (b, rest) = rest.split_once(':').ok_or_else(malformed)?;
    let mut cde = rest.split('.');
    let c = cde.next().ok_or_else(malformed)?;
    let d = cde.next().ok_or_else(malformed)?;
    let e = cde.next().ok_or_else(malformed)?;
    if cde.next().is_some() {
        return Err(malformed());
    }

    let group = |g: &str| {
        let n: u32 = g.parse().map_err(|_| malformed())?;
        u8::try_from(n).map_err(|_| ObisError::GroupOutOfRange(original.to_string()))
    };
    Ok([group(a)?, group(b)?, group(c)?, group(d)?, group(e)?, 0xff])
}
