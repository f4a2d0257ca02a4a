use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint};
use num_traits::ToPrimitive;

use crate::decoder::{
    base_256_exponent, decode_float, decode_integer, qan_raw, qex_raw, qigit_count,
};
use crate::encoder::{
    encode_float, encode_i128, encode_integer, encode_u128, Qigits, RAW_INFINITESIMAL,
    RAW_INFINITESIMAL_NEG, RAW_INFINITY, RAW_INFINITY_NEG, RAW_NAN, RAW_ZERO,
};
use crate::error::{DecodeError, DecodeResult, EncodeError, EncodeResult};
use crate::normalize::{collapse_plateau, normalize};
use crate::pack::unpack_integer;
use crate::qstring;
use crate::suffix::{parse_suffixes, Suffix, SuffixType, TERMINATOR};
use crate::zone::Zone;

/// A number held in its raw encoding
///
/// The raw byte string is the only state; the zone is derived from it and cached. Raws
/// compare in numeric order under plain unsigned byte comparison, so [`as_bytes`] is
/// directly usable as a sort key by byte-oriented stores.
///
/// Comparison operators go further than byte order: both sides are normalized first, so
/// plateau aliases such as `0q82` and `0q82_01` (both 1) are equal.
///
/// # NaN semantics
///
/// NaN is the empty raw. It equals itself and sorts below every other value, including
/// negative infinity. [`to_f64`](Self::to_f64) still returns an IEEE NaN for it.
///
/// # Complex numbers
///
/// A number with a nonzero imaginary suffix is complex. Complex numbers can be tested for
/// equality but are unordered: [`partial_cmp`](PartialOrd::partial_cmp) returns `None`
/// for them (unless they are equal) and [`try_cmp`](Self::try_cmp) returns an error.
///
/// [`as_bytes`]: Self::as_bytes
#[derive(Clone)]
pub struct Number {
    raw: Vec<u8>,
    zone: Zone,
}

impl Number {
    /// Wrap a raw. Every byte string is a raw, so this cannot fail.
    #[must_use]
    pub fn from_raw(raw: impl Into<Vec<u8>>) -> Self {
        let raw = raw.into();
        let zone = Zone::of(&raw);
        Self { raw, zone }
    }

    /// The raw bytes (zero-copy)
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.raw
    }

    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.raw
    }

    #[must_use]
    pub fn zone(&self) -> Zone {
        self.zone
    }

    #[must_use]
    pub fn nan() -> Self {
        Self::from_raw(RAW_NAN)
    }

    #[must_use]
    pub fn zero() -> Self {
        Self::from_raw(RAW_ZERO)
    }

    #[must_use]
    pub fn infinity() -> Self {
        Self::from_raw(RAW_INFINITY)
    }

    #[must_use]
    pub fn neg_infinity() -> Self {
        Self::from_raw(RAW_INFINITY_NEG)
    }

    /// Greater than zero, less than every positive real.
    #[must_use]
    pub fn infinitesimal() -> Self {
        Self::from_raw(RAW_INFINITESIMAL)
    }

    #[must_use]
    pub fn neg_infinitesimal() -> Self {
        Self::from_raw(RAW_INFINITESIMAL_NEG)
    }

    /// Encode an integer of any size.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::LudicrousNotImplemented`] for magnitudes of 256^125 and up.
    pub fn from_bigint(value: &BigInt) -> EncodeResult<Self> {
        encode_integer(value).map(Self::from_raw)
    }

    /// Encode a float with `qigits` of precision.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::LudicrousNotImplemented`] for finite magnitudes of 2^1000 and
    /// up, or nonzero magnitudes below 2^-1000.
    pub fn from_f64(x: f64, qigits: Qigits) -> EncodeResult<Self> {
        encode_float(x, qigits).map(Self::from_raw)
    }

    /// Encode a complex number: the real part as a float, the imaginary part in an
    /// imaginary suffix.
    ///
    /// # Errors
    ///
    /// Fails like [`from_f64`](Self::from_f64) on either part, and with
    /// [`EncodeError::SuffixNan`] when the real part is NaN.
    pub fn from_complex(re: f64, im: f64) -> EncodeResult<Self> {
        Self::from_complex_with_qigits(re, im, Qigits::DEFAULT)
    }

    /// [`from_complex`](Self::from_complex) with explicit precision for both parts.
    ///
    /// # Errors
    ///
    /// See [`from_complex`](Self::from_complex).
    pub fn from_complex_with_qigits(re: f64, im: f64, qigits: Qigits) -> EncodeResult<Self> {
        let imag = Self::from_f64(im, qigits)?;
        Self::from_f64(re, qigits)?.plus_suffix(SuffixType::IMAGINARY, &imag)
    }

    /// Parse a q-string such as `0q82_01`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::InvalidQstring`] without the `0q` prefix or with non-hex digits.
    pub fn from_qstring(text: &str) -> EncodeResult<Self> {
        qstring::parse_qstring(text).map(Self::from_raw)
    }

    // Predicates
    // ----------

    #[must_use]
    pub fn is_nan(&self) -> bool {
        self.raw.is_empty()
    }

    /// Exactly `0q80`: no suffixes.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.raw == RAW_ZERO
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.zone.is_positive()
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.zone.is_negative()
    }

    #[must_use]
    pub fn is_reasonable(&self) -> bool {
        self.zone.is_reasonable()
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.zone.is_finite()
    }

    /// Is the root an integer?
    #[must_use]
    pub fn is_whole(&self) -> bool {
        let Ok(root) = self.root() else {
            return false;
        };
        let canonical = collapse_plateau(root);
        let root = canonical.as_deref().unwrap_or(root);
        let zone = Zone::of(root);
        if zone.is_whole_yes() {
            return true;
        }
        if !zone.is_whole_maybe() {
            return false;
        }
        let (Ok(exponent), Ok(qan)) = (base_256_exponent(root, zone), qan_raw(root, zone, None))
        else {
            return false;
        };
        // qigits below the units position must all be zero
        let fraction = usize::try_from(qigit_count(qan) - exponent).unwrap_or(0);
        qan[qan.len() - fraction.min(qan.len())..]
            .iter()
            .all(|&b| b == 0x00)
    }

    #[must_use]
    pub fn is_suffixed(&self) -> bool {
        self.raw.last() == Some(&TERMINATOR)
    }

    /// Has a nonzero imaginary part?
    #[must_use]
    pub fn is_complex(&self) -> bool {
        if !self.is_suffixed() {
            return false;
        }
        self.imag().is_ok_and(|imag| !imag.is_zero_after_normalizing())
    }

    fn is_zero_after_normalizing(&self) -> bool {
        self.comparable_raw().as_ref() == RAW_ZERO
    }

    // Suffixes
    // --------

    /// A copy with one more suffix.
    ///
    /// ```
    /// use qiki_number::{Number, SuffixType};
    ///
    /// let n = Number::zero().plus_suffix(SuffixType::IMAGINARY, &Number::from(2)).unwrap();
    /// assert_eq!(n.to_string(), "0q80__8202_690300");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::SuffixNan`] for NaN, [`EncodeError::PayloadTooLong`] past
    /// 250 payload bytes.
    pub fn plus_suffix(&self, type_: SuffixType, payload: impl AsRef<[u8]>) -> EncodeResult<Self> {
        self.with_suffix(&Suffix::new(type_, payload)?)
    }

    /// A copy with `suffix` appended.
    ///
    /// # Errors
    ///
    /// Returns [`EncodeError::SuffixNan`] for NaN.
    pub fn with_suffix(&self, suffix: &Suffix) -> EncodeResult<Self> {
        if self.is_nan() {
            return Err(EncodeError::SuffixNan);
        }
        let mut raw = self.raw.clone();
        raw.extend(suffix.raw());
        Ok(Self::from_raw(raw))
    }

    /// A copy without any suffix of this type. `None` removes empty suffixes.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::NoSuchSuffix`] if there was nothing to remove, or
    /// [`DecodeError::SuffixStructure`] if the suffix chain is malformed.
    pub fn minus_suffix(&self, type_: impl Into<Option<SuffixType>>) -> DecodeResult<Self> {
        let type_ = type_.into();
        let (root, suffixes) = parse_suffixes(&self.raw)?;
        let mut raw = root.to_vec();
        let mut removed = false;
        for suffix in &suffixes {
            if suffix.type_() == type_ {
                removed = true;
            } else {
                raw.extend(suffix.raw());
            }
        }
        if !removed {
            return Err(DecodeError::NoSuchSuffix(type_.map(|SuffixType(code)| code)));
        }
        Ok(Self::from_raw(raw))
    }

    /// All suffixes, in the order they were added.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::SuffixStructure`] if the suffix chain is malformed.
    pub fn suffixes(&self) -> DecodeResult<Vec<Suffix>> {
        parse_suffixes(&self.raw).map(|(_, suffixes)| suffixes)
    }

    /// The first suffix of a type.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::SuffixStructure`] if the suffix chain is malformed.
    pub fn suffix(&self, type_: impl Into<Option<SuffixType>>) -> DecodeResult<Option<Suffix>> {
        let type_ = type_.into();
        Ok(self
            .suffixes()?
            .into_iter()
            .find(|suffix| suffix.type_() == type_))
    }

    /// The root, with every suffix removed.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::SuffixStructure`] if the suffix chain is malformed.
    pub fn unsuffixed(&self) -> DecodeResult<Self> {
        self.root().map(Self::from_raw)
    }

    /// Real part: the root.
    ///
    /// # Errors
    ///
    /// See [`unsuffixed`](Self::unsuffixed).
    pub fn real(&self) -> DecodeResult<Self> {
        self.unsuffixed()
    }

    /// Imaginary part: the first imaginary suffix's payload, or zero.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::SuffixStructure`] if the suffix chain is malformed.
    pub fn imag(&self) -> DecodeResult<Self> {
        Ok(self
            .suffix(SuffixType::IMAGINARY)?
            .map_or_else(Self::zero, |suffix| suffix.number()))
    }

    fn root(&self) -> DecodeResult<&[u8]> {
        if !self.is_suffixed() {
            return Ok(&self.raw);
        }
        parse_suffixes(&self.raw).map(|(root, _)| root)
    }

    // Decomposition
    // -------------

    /// Base-256 exponent of the root.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::QexUndefined`] for zones without one.
    pub fn qex_int(&self) -> DecodeResult<i32> {
        let root = self.root()?;
        base_256_exponent(root, Zone::of(root))
    }

    /// qex bytes of the root.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::QexUndefined`] for zones without one.
    pub fn qex_raw(&self) -> DecodeResult<Vec<u8>> {
        let root = self.root()?;
        qex_raw(root, Zone::of(root)).map(<[u8]>::to_vec)
    }

    /// qan bytes of the root.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::QanUndefined`] for zones without one.
    pub fn qan_raw(&self) -> DecodeResult<Vec<u8>> {
        let root = self.root()?;
        qan_raw(root, Zone::of(root), None).map(<[u8]>::to_vec)
    }

    /// The qan as an unsigned integer, and its length in qigits.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::QanUndefined`] for zones without one.
    pub fn qan_int_len(&self) -> DecodeResult<(BigUint, usize)> {
        let qan = self.qan_raw()?;
        Ok((unpack_integer(&qan), qan.len()))
    }

    // Conversion
    // ----------

    /// The root as an integer, truncated toward zero.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::NanToInt`] for NaN
    /// - [`DecodeError::IntOverflow`] for ±infinity
    /// - [`DecodeError::LudicrousNotImplemented`] for ludicrous magnitudes
    pub fn to_bigint(&self) -> DecodeResult<BigInt> {
        let root = self.root()?;
        decode_integer(root, Zone::of(root))
    }

    /// The nearest `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::ImaginaryPart`] for complex numbers and
    /// [`DecodeError::LudicrousNotImplemented`] for ludicrous magnitudes.
    pub fn to_f64(&self) -> DecodeResult<f64> {
        if self.is_complex() {
            return Err(DecodeError::ImaginaryPart(self.qstring()));
        }
        let root = self.root()?;
        decode_float(root, Zone::of(root))
    }

    /// Real and imaginary parts as `f64`s.
    ///
    /// # Errors
    ///
    /// Fails like [`to_f64`](Self::to_f64) on either part.
    pub fn to_complex(&self) -> DecodeResult<(f64, f64)> {
        Ok((self.real()?.to_f64()?, self.imag()?.to_f64()?))
    }

    // Normalization and comparison
    // ----------------------------

    /// The canonical encoding of the same value.
    ///
    /// ```
    /// use qiki_number::Number;
    ///
    /// let plateau = Number::from_qstring("0q82").unwrap();
    /// assert_eq!(plateau.normalized().unwrap().to_string(), "0q82_01");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::SuffixStructure`] if the suffix chain is malformed.
    pub fn normalized(&self) -> DecodeResult<Self> {
        normalize(&self.raw).map(Self::from_raw)
    }

    /// Order two numbers.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Unordered`] if either number is complex.
    pub fn try_cmp(&self, other: &Self) -> DecodeResult<Ordering> {
        if self.is_complex() || other.is_complex() {
            return Err(DecodeError::Unordered(self.qstring(), other.qstring()));
        }
        Ok(self.comparable_raw().cmp(&other.comparable_raw()))
    }

    /// The normalized raw, or the raw itself if its suffix chain is malformed.
    fn comparable_raw(&self) -> Cow<'_, [u8]> {
        if !self.is_suffixed() {
            return collapse_plateau(&self.raw).map_or(Cow::Borrowed(&self.raw), Cow::Owned);
        }
        normalize(&self.raw).map_or(Cow::Borrowed(&self.raw), Cow::Owned)
    }

    // Text
    // ----

    /// `0q` hex with underscores after the qex and around suffixes: `0q82_01`.
    #[must_use]
    pub fn qstring(&self) -> String {
        qstring::qstring(&self.raw)
    }

    /// `0q` hex with no underscores: `0q8201`.
    #[must_use]
    pub fn qstring_plain(&self) -> String {
        qstring::qstring_plain(&self.raw)
    }

    /// Upper-case hex of the raw: `8201`.
    #[must_use]
    pub fn hex(&self) -> String {
        hex::encode_upper(&self.raw)
    }

    /// `x'8201'`
    #[must_use]
    pub fn x_apostrophe_hex(&self) -> String {
        qstring::x_apostrophe_hex(&self.raw)
    }

    /// `0x8201`
    #[must_use]
    pub fn zero_x_hex(&self) -> String {
        qstring::zero_x_hex(&self.raw)
    }

    /// `"\x82\x01"`
    #[must_use]
    pub fn c_string(&self) -> String {
        qstring::c_string(&self.raw)
    }
}

/// Text to integer, for decimal and `0x`/`0o`/`0b` forms with an optional sign.
fn parse_integer_text(text: &str) -> Option<BigInt> {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let lower = body.get(..2).map(str::to_ascii_lowercase);
    let (radix, digits) = match lower.as_deref() {
        Some("0x") => (16, &body[2..]),
        Some("0o") => (8, &body[2..]),
        Some("0b") => (2, &body[2..]),
        _ => (10, body),
    };
    if !digits.starts_with(|c: char| c.is_ascii_alphanumeric()) || digits.contains('_') {
        return None;
    }
    let magnitude = BigInt::parse_bytes(digits.as_bytes(), radix)?;
    Some(if negative { -magnitude } else { magnitude })
}

impl FromStr for Number {
    type Err = EncodeError;

    /// Parse a q-string, an integer (decimal or `0x`/`0o`/`0b`), or a float.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.starts_with(qstring::PREFIX) {
            return Self::from_qstring(text);
        }
        if let Some(value) = parse_integer_text(text) {
            return Self::from_bigint(&value);
        }
        match text.parse::<f64>() {
            Ok(x) => Self::from_f64(x, Qigits::DEFAULT),
            Err(_) => Err(EncodeError::InvalidText(s.to_string())),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qstring())
    }
}

impl fmt::Debug for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Number").field(&self.qstring()).finish()
    }
}

impl AsRef<[u8]> for Number {
    fn as_ref(&self) -> &[u8] {
        &self.raw
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.comparable_raw() == other.comparable_raw()
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.comparable_raw().hash(state);
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        let (left, right) = (self.comparable_raw(), other.comparable_raw());
        if left == right {
            return Some(Ordering::Equal);
        }
        if self.is_complex() || other.is_complex() {
            return None;
        }
        Some(left.cmp(&right))
    }
}

impl Default for Number {
    fn default() -> Self {
        Self::zero()
    }
}

macro_rules! from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Self::from_raw(encode_i128(i128::from(value)))
            }
        }
    )*};
}

macro_rules! from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for Number {
            fn from(value: $t) -> Self {
                Self::from_raw(encode_u128(u128::from(value)))
            }
        }
    )*};
}

from_signed!(i8, i16, i32, i64, i128);
from_unsigned!(u8, u16, u32, u64, u128);

impl From<isize> for Number {
    fn from(value: isize) -> Self {
        Self::from_raw(encode_i128(value as i128))
    }
}

impl From<usize> for Number {
    fn from(value: usize) -> Self {
        Self::from_raw(encode_u128(value as u128))
    }
}

impl TryFrom<&BigInt> for Number {
    type Error = EncodeError;

    fn try_from(value: &BigInt) -> Result<Self, Self::Error> {
        Self::from_bigint(value)
    }
}

impl TryFrom<BigInt> for Number {
    type Error = EncodeError;

    fn try_from(value: BigInt) -> Result<Self, Self::Error> {
        Self::from_bigint(&value)
    }
}

impl TryFrom<f64> for Number {
    type Error = EncodeError;

    /// Encode at the default eight qigits.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::from_f64(value, Qigits::DEFAULT)
    }
}

impl TryFrom<f32> for Number {
    type Error = EncodeError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::from_f64(f64::from(value), Qigits::DEFAULT)
    }
}

impl TryFrom<&Number> for BigInt {
    type Error = DecodeError;

    fn try_from(value: &Number) -> Result<Self, Self::Error> {
        value.to_bigint()
    }
}

impl TryFrom<&Number> for i64 {
    type Error = DecodeError;

    fn try_from(value: &Number) -> Result<Self, Self::Error> {
        value
            .to_bigint()?
            .to_i64()
            .ok_or_else(|| DecodeError::IntOverflow(value.qstring()))
    }
}

impl TryFrom<&Number> for i128 {
    type Error = DecodeError;

    fn try_from(value: &Number) -> Result<Self, Self::Error> {
        value
            .to_bigint()?
            .to_i128()
            .ok_or_else(|| DecodeError::IntOverflow(value.qstring()))
    }
}

impl TryFrom<&Number> for f64 {
    type Error = DecodeError;

    fn try_from(value: &Number) -> Result<Self, Self::Error> {
        value.to_f64()
    }
}
