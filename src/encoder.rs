//! Native values to raw: integers, floats and the fixed sentinels.

use num_bigint::{BigInt, Sign};
use tracing::debug;

use crate::error::{EncodeError, EncodeResult};
use crate::pack::{pack_integer, right_strip00};

pub(crate) const RAW_NAN: &[u8] = &[];
pub(crate) const RAW_ZERO: &[u8] = &[0x80];
pub(crate) const RAW_INFINITY: &[u8] = &[0xFF, 0x81];
pub(crate) const RAW_INFINITY_NEG: &[u8] = &[0x00, 0x7F];
pub(crate) const RAW_INFINITESIMAL: &[u8] = &[0x80, 0x7F];
pub(crate) const RAW_INFINITESIMAL_NEG: &[u8] = &[0x7F, 0x81];

/// Widest float qan computed in native arithmetic. Past this the extra qigits are
/// always zero, and zero qigits are stripped.
const MAX_ARITHMETIC_QIGITS: usize = 15;

/// Number of base-256 digits ("qigits") a float's qan is rounded to.
///
/// Eight qigits hold the 53-bit significand of an `f64` losslessly: the first qigit may carry
/// as little as one significant bit, so 1 + 7 × 8 = 57 bits are guaranteed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Qigits(usize);

impl Qigits {
    pub const DEFAULT: Qigits = Qigits(8);

    /// Zero means the default.
    #[must_use]
    pub const fn new(qigits: usize) -> Self {
        if qigits == 0 {
            Self::DEFAULT
        } else {
            Self(qigits)
        }
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl Default for Qigits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Encode an arbitrary-precision integer.
///
/// # Errors
///
/// Returns [`EncodeError::LudicrousNotImplemented`] for magnitudes of 256^125 and up.
pub fn encode_integer(value: &BigInt) -> EncodeResult<Vec<u8>> {
    let qan00 = match value.sign() {
        Sign::NoSign => return Ok(RAW_ZERO.to_vec()),
        Sign::Plus | Sign::Minus => pack_integer(value, None),
    };
    let qex = integer_qex(value.sign() == Sign::Plus, qan00.len())
        .ok_or_else(|| EncodeError::LudicrousNotImplemented(value.to_string()))?;
    Ok(with_qex(&[qex], right_strip00(&qan00)))
}

/// Encode a native integer. Always reasonable: 128 bits is at most 16 qigits.
pub(crate) fn encode_i128(value: i128) -> Vec<u8> {
    if value >= 0 {
        return encode_u128(value.unsigned_abs());
    }
    let width = magnitude_width(value.unsigned_abs());
    let bytes = value.to_be_bytes();
    let qex = integer_qex(false, width).unwrap_or(0x01);
    with_qex(&[qex], right_strip00(&bytes[bytes.len() - width..]))
}

pub(crate) fn encode_u128(value: u128) -> Vec<u8> {
    if value == 0 {
        return RAW_ZERO.to_vec();
    }
    let width = magnitude_width(value);
    let bytes = value.to_be_bytes();
    let qex = integer_qex(true, width).unwrap_or(0xFE);
    with_qex(&[qex], right_strip00(&bytes[bytes.len() - width..]))
}

/// Encode a float, rounding its qan to `qigits`.
///
/// Rounding adds ±0.5 in native float arithmetic before truncating, so results match
/// other implementations of this format bit for bit.
///
/// # Errors
///
/// Returns [`EncodeError::LudicrousNotImplemented`] for finite magnitudes of 2^1000 and up,
/// and for nonzero magnitudes below 2^-1000.
pub fn encode_float(x: f64, qigits: Qigits) -> EncodeResult<Vec<u8>> {
    let smallest_unreasonable = pow2(1000);
    if x.is_nan() {
        return Ok(RAW_NAN.to_vec());
    }
    if x == f64::INFINITY {
        return Ok(RAW_INFINITY.to_vec());
    }
    if x == f64::NEG_INFINITY {
        return Ok(RAW_INFINITY_NEG.to_vec());
    }
    if x == 0.0 {
        return Ok(RAW_ZERO.to_vec());
    }
    let ludicrous = || EncodeError::LudicrousNotImplemented(x.to_string());
    if x.abs() >= smallest_unreasonable {
        return Err(ludicrous());
    }

    let (exponent_base_256, qan) = float_qan(x, qigits);
    let qex = float_qex(x > 0.0, exponent_base_256).ok_or_else(ludicrous)?;
    Ok(with_qex(&qex, right_strip00(&qan)))
}

/// Split a nonzero finite float into a base-256 exponent and a `qigits`-wide two's
/// complement qan.
fn float_qan(x: f64, qigits: Qigits) -> (i32, Vec<u8>) {
    let (significand_base_2, exponent_base_2) = frexp(x);
    let mut exponent_base_256 = (exponent_base_2 + 7).div_euclid(8);
    let zero_to_seven = (exponent_base_2 + 7).rem_euclid(8);
    let significand_base_256 = significand_base_2 * pow2(zero_to_seven - 7);

    let width = qigits.get().min(MAX_ARITHMETIC_QIGITS);
    let scale = 8 * i32::try_from(width).unwrap_or(0);
    let rounder = if x >= 0.0 { 0.5 } else { -0.5 };
    #[allow(clippy::cast_possible_truncation)]
    let mut qan_integer = (significand_base_256 * pow2(scale) + rounder) as i128;

    // Rounding up past the last qigit carries into the exponent.
    if qan_integer.unsigned_abs() >= 1_u128 << scale {
        debug!(x, width, "float qan rounded into the next exponent");
        exponent_base_256 += 1;
        qan_integer /= 256;
    }
    let bytes = qan_integer.to_be_bytes();
    (exponent_base_256, bytes[bytes.len() - width..].to_vec())
}

/// qex for an integer whose minimal qan00 is `width` bytes; `None` past the reasonable zones.
fn integer_qex(positive: bool, width: usize) -> Option<u8> {
    let width = i32::try_from(width).ok()?;
    let code = if positive { 0x81 + width } else { 0x7E - width };
    u8::try_from(code).ok().filter(|qex| (0x01..=0xFE).contains(qex))
}

/// qex bytes for a float with the given base-256 exponent.
fn float_qex(positive: bool, exponent: i32) -> Option<Vec<u8>> {
    let qex = match (positive, exponent >= 1) {
        (true, true) => vec![u8::try_from(0x81 + exponent).ok().filter(|&b| b <= 0xFE)?],
        (true, false) => vec![0x81, u8::try_from(0xFF + exponent).ok().filter(|&b| b >= 0x83)?],
        (false, true) => vec![u8::try_from(0x7E - exponent).ok().filter(|&b| b >= 0x01)?],
        (false, false) => vec![0x7E, u8::try_from(-exponent).ok().filter(|&b| b <= 0x7C)?],
    };
    Some(qex)
}

fn with_qex(qex: &[u8], qan: &[u8]) -> Vec<u8> {
    let mut raw = Vec::with_capacity(qex.len() + qan.len());
    raw.extend_from_slice(qex);
    raw.extend_from_slice(qan);
    raw
}

/// Bytes in the magnitude of a nonzero integer.
fn magnitude_width(magnitude: u128) -> usize {
    16 - (magnitude.leading_zeros() / 8) as usize
}

/// `2^e` as an `f64`, built from its bits: exact wherever representable.
#[allow(clippy::cast_sign_loss)]
pub(crate) fn pow2(e: i32) -> f64 {
    if e > 1023 {
        f64::INFINITY
    } else if e >= -1022 {
        f64::from_bits(((e + 1023) as u64) << 52)
    } else if e >= -1074 {
        f64::from_bits(1_u64 << (e + 1074))
    } else {
        0.0
    }
}

/// Split `x` into a significand in `[0.5, 1)` (signed) and a power of two.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub(crate) fn frexp(x: f64) -> (f64, i32) {
    if x == 0.0 || !x.is_finite() {
        return (x, 0);
    }
    let bits = x.to_bits();
    let biased = ((bits >> 52) & 0x7FF) as i32;
    if biased == 0 {
        let (significand, exponent) = frexp(x * pow2(64));
        return (significand, exponent - 64);
    }
    let significand = f64::from_bits((bits & !(0x7FF_u64 << 52)) | (1022_u64 << 52));
    (significand, biased - 1022)
}

/// `x × 2^e`, scaled in steps so intermediate powers stay representable.
pub(crate) fn ldexp(mut x: f64, mut e: i32) -> f64 {
    while e > 1000 && x.is_finite() && x != 0.0 {
        x *= pow2(1000);
        e -= 1000;
    }
    while e < -1000 && x != 0.0 {
        x *= pow2(-1000);
        e += 1000;
    }
    x * pow2(e.clamp(-1074, 1024))
}
