//! Suffixes: typed, length-prefixed tags chained onto the end of a root raw.
//!
//! A suffix encodes as `payload ++ type ++ length ++ 0x00`, where `length` counts the
//! payload plus the type byte. The empty suffix is just `0x00 0x00`. Chains are parsed from
//! the right end, since each terminator is preceded by the length of what lies before it.

use std::fmt;

use tracing::debug;

use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::number::Number;

/// Longest payload a suffix may carry.
pub const MAX_PAYLOAD_LENGTH: usize = 250;

/// Bytes a typed suffix adds beyond its payload: type, length and terminator.
pub const NUM_OVERHEAD: usize = 3;

/// Final byte of every suffix. No unsuffixed root ends in it.
pub const TERMINATOR: u8 = 0x00;

/// One-byte suffix type code. The namespace is open; the associated constants are the
/// codes with a defined meaning.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SuffixType(pub u8);

impl SuffixType {
    /// Index into a foreign listing; the root identifies the listing.
    pub const LISTING: SuffixType = SuffixType(0x1D);
    /// Imaginary part; the payload is a Number raw.
    pub const IMAGINARY: SuffixType = SuffixType(0x69);
    pub const TEST: SuffixType = SuffixType(0x7E);
}

impl fmt::Debug for SuffixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SuffixType::LISTING => f.write_str("LISTING"),
            SuffixType::IMAGINARY => f.write_str("IMAGINARY"),
            SuffixType::TEST => f.write_str("TEST"),
            SuffixType(code) => write!(f, "SuffixType(0x{code:02X})"),
        }
    }
}

/// A single suffix. The payload stays raw bytes until [`Suffix::number`] interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Suffix {
    type_: Option<SuffixType>,
    payload: Vec<u8>,
}

impl Suffix {
    /// The suffix with no type and no payload.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            type_: None,
            payload: Vec::new(),
        }
    }

    /// A typed suffix.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::PayloadTooLong`] if the payload exceeds
    /// [`MAX_PAYLOAD_LENGTH`] bytes.
    pub fn new(type_: SuffixType, payload: impl AsRef<[u8]>) -> EncodeResult<Self> {
        let payload = payload.as_ref();
        if payload.len() > MAX_PAYLOAD_LENGTH {
            return Err(EncodeError::PayloadTooLong(payload.len()));
        }
        Ok(Self {
            type_: Some(type_),
            payload: payload.to_vec(),
        })
    }

    #[must_use]
    pub fn type_(&self) -> Option<SuffixType> {
        self.type_
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// The payload read as a Number raw.
    #[must_use]
    pub fn number(&self) -> Number {
        Number::from_raw(self.payload.clone())
    }

    /// The suffix's own encoding.
    #[must_use]
    pub fn raw(&self) -> Vec<u8> {
        let Some(SuffixType(code)) = self.type_ else {
            return vec![0x00, TERMINATOR];
        };
        let mut raw = Vec::with_capacity(self.payload.len() + NUM_OVERHEAD);
        raw.extend_from_slice(&self.payload);
        raw.push(code);
        // Payloads are capped at 250 bytes, so this never saturates.
        raw.push(u8::try_from(self.payload.len() + 1).unwrap_or(u8::MAX));
        raw.push(TERMINATOR);
        raw
    }

    /// Hex of the raw, with `_` before the type/length/terminator when there is a payload.
    ///
    /// ```
    /// use qiki_number::{Suffix, SuffixType};
    ///
    /// let suffix = Suffix::new(SuffixType(0x11), [0x77, 0x88, 0x99]).unwrap();
    /// assert_eq!(suffix.qstring(), "778899_110400");
    /// ```
    #[must_use]
    pub fn qstring(&self) -> String {
        let whole = hex::encode_upper(self.raw());
        if self.payload.is_empty() {
            whole
        } else {
            let split = whole.len() - 2 * NUM_OVERHEAD;
            format!("{}_{}", &whole[..split], &whole[split..])
        }
    }
}

impl Default for Suffix {
    fn default() -> Self {
        Self::empty()
    }
}

/// Split a raw into its root and its suffixes, left to right.
///
/// # Errors
///
/// Returns [`DecodeError::SuffixStructure`] when a terminator is not preceded by a complete
/// suffix, or when the suffixes consume the whole raw (NaN cannot be suffixed).
pub(crate) fn parse_suffixes(raw: &[u8]) -> DecodeResult<(&[u8], Vec<Suffix>)> {
    let mut suffixes = Vec::new();
    let mut end = raw.len();
    for start in suffix_starts(raw)? {
        suffixes.push(suffix_between(raw, start, end)?);
        end = start;
    }
    suffixes.reverse();
    Ok((&raw[..end], suffixes))
}

/// Start index of each suffix, scanning from the right.
fn suffix_starts(raw: &[u8]) -> DecodeResult<Vec<usize>> {
    let mut starts = Vec::new();
    let mut end = raw.len();
    if end == 0 {
        return Ok(starts);
    }
    loop {
        let Some(terminator) = end.checked_sub(1) else {
            return Err(structure_error(raw, "cannot suffix NaN"));
        };
        if raw[terminator] != TERMINATOR {
            return Ok(starts);
        }
        let Some(length_index) = end.checked_sub(2) else {
            return Err(structure_error(raw, "terminator without a length byte"));
        };
        let length = usize::from(raw[length_index]);
        let Some(start) = length_index.checked_sub(length) else {
            return Err(structure_error(raw, "suffix length overruns the raw"));
        };
        starts.push(start);
        end = start;
    }
}

fn suffix_between(raw: &[u8], start: usize, end: usize) -> DecodeResult<Suffix> {
    // end == start + length + 2, and a zero length is the empty suffix
    if end - start == 2 {
        return Ok(Suffix::empty());
    }
    let type_index = end - NUM_OVERHEAD;
    if type_index - start > MAX_PAYLOAD_LENGTH {
        return Err(structure_error(raw, "suffix payload too long"));
    }
    Ok(Suffix {
        type_: Some(SuffixType(raw[type_index])),
        payload: raw[start..type_index].to_vec(),
    })
}

fn structure_error(raw: &[u8], reason: &'static str) -> DecodeError {
    debug!(raw = %hex::encode_upper(raw), reason, "bad suffix chain");
    DecodeError::SuffixStructure(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suffix_raw() {
        assert_eq!(Suffix::empty().raw(), [0x00, 0x00]);
        assert_eq!(Suffix::new(SuffixType::TEST, []).unwrap().raw(), [0x7E, 0x01, 0x00]);
        assert_eq!(
            Suffix::new(SuffixType::IMAGINARY, [0x82, 0x02]).unwrap().raw(),
            [0x82, 0x02, 0x69, 0x03, 0x00]
        );
    }

    #[test]
    fn test_suffix_qstring() {
        assert_eq!(Suffix::empty().qstring(), "0000");
        assert_eq!(Suffix::new(SuffixType::TEST, []).unwrap().qstring(), "7E0100");
        assert_eq!(
            Suffix::new(SuffixType(0x11), [0x77, 0x88, 0x99])
                .unwrap()
                .qstring(),
            "778899_110400"
        );
    }

    #[test]
    fn test_payload_limit() {
        assert!(Suffix::new(SuffixType::TEST, vec![0xAA; MAX_PAYLOAD_LENGTH]).is_ok());
        assert_eq!(
            Suffix::new(SuffixType::TEST, vec![0xAA; MAX_PAYLOAD_LENGTH + 1]),
            Err(EncodeError::PayloadTooLong(251))
        );
    }

    #[test]
    fn test_parse_unsuffixed() {
        let (root, suffixes) = parse_suffixes(&[0x82, 0x01]).unwrap();
        assert_eq!(root, [0x82, 0x01]);
        assert!(suffixes.is_empty());

        let (root, suffixes) = parse_suffixes(&[]).unwrap();
        assert!(root.is_empty());
        assert!(suffixes.is_empty());
    }

    #[test]
    fn test_parse_chain_left_to_right() {
        let mut raw = vec![0x82, 0x01];
        raw.extend(Suffix::new(SuffixType::LISTING, [0x82, 0x07]).unwrap().raw());
        raw.extend(Suffix::empty().raw());
        raw.extend(Suffix::new(SuffixType::TEST, b"abc").unwrap().raw());

        let (root, suffixes) = parse_suffixes(&raw).unwrap();
        assert_eq!(root, [0x82, 0x01]);
        assert_eq!(suffixes.len(), 3);
        assert_eq!(suffixes[0].type_(), Some(SuffixType::LISTING));
        assert_eq!(suffixes[0].payload(), [0x82, 0x07]);
        assert_eq!(suffixes[1], Suffix::empty());
        assert_eq!(suffixes[2].payload(), b"abc");
    }

    #[test]
    fn test_parse_errors() {
        // terminator with nothing before it
        assert!(parse_suffixes(&[0x00]).is_err());
        // length reaches past the start
        assert!(parse_suffixes(&[0x82, 0x05, 0x00]).is_err());
        // suffix that consumes the whole raw leaves a NaN root
        assert!(parse_suffixes(&[0x7E, 0x01, 0x00]).is_err());
        assert!(parse_suffixes(&[0x00, 0x00]).is_err());
    }

    #[test]
    fn test_suffix_type_debug() {
        assert_eq!(format!("{:?}", SuffixType::IMAGINARY), "IMAGINARY");
        assert_eq!(format!("{:?}", SuffixType(0x11)), "SuffixType(0x11)");
    }
}
