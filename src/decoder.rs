//! Raw to native values.
//!
//! Everything here works on a root raw, one with its suffixes already split off.

use num_bigint::{BigInt, BigUint};
use num_traits::Zero;

use crate::encoder::{ldexp, RAW_ZERO};
use crate::error::{DecodeError, DecodeResult};
use crate::normalize::collapse_plateau;
use crate::pack::{exp256, unpack_integer};
use crate::zone::Zone;

/// Qigits read when decoding to `f64`: the default precision plus two guard qigits.
const FLOAT_DECODE_QIGITS: usize = 10;

/// Length of the qex, which is also where the qan starts.
///
/// # Errors
///
/// Returns [`DecodeError::QanUndefined`] for zones without a qan.
pub fn qan_offset(zone: Zone) -> DecodeResult<usize> {
    match zone {
        Zone::Positive | Zone::Negative => Ok(1),
        Zone::Fractional | Zone::FractionalNeg => Ok(2),
        _ => Err(DecodeError::QanUndefined(zone)),
    }
}

/// The base-256 exponent encoded by the qex.
///
/// # Errors
///
/// Returns [`DecodeError::QexUndefined`] for zones without a qex, or a root too short to
/// hold one.
pub fn base_256_exponent(root: &[u8], zone: Zone) -> DecodeResult<i32> {
    let byte = |index: usize| {
        root.get(index)
            .map(|&b| i32::from(b))
            .ok_or(DecodeError::QexUndefined(zone))
    };
    match zone {
        Zone::Positive => Ok(byte(0)? - 0x81),
        Zone::Fractional => Ok(byte(1)? - 0xFF),
        Zone::FractionalNeg => Ok(0x00 - byte(1)?),
        Zone::Negative => Ok(0x7E - byte(0)?),
        _ => Err(DecodeError::QexUndefined(zone)),
    }
}

/// The qex bytes of a root.
///
/// # Errors
///
/// Returns [`DecodeError::QexUndefined`] for zones without a qex.
pub fn qex_raw(root: &[u8], zone: Zone) -> DecodeResult<&[u8]> {
    let offset = qan_offset(zone).map_err(|_| DecodeError::QexUndefined(zone))?;
    Ok(&root[..offset.min(root.len())])
}

/// The qan bytes of a root, at most `max_qigits` of them.
///
/// # Errors
///
/// Returns [`DecodeError::QanUndefined`] for zones without a qan.
pub fn qan_raw(root: &[u8], zone: Zone, max_qigits: Option<usize>) -> DecodeResult<&[u8]> {
    let qan = root.get(qan_offset(zone)?..).unwrap_or_default();
    Ok(match max_qigits {
        Some(max) if max < qan.len() => &qan[..max],
        _ => qan,
    })
}

/// The integer a root represents, truncated toward zero.
///
/// # Errors
///
/// - [`DecodeError::NanToInt`] for NaN
/// - [`DecodeError::IntOverflow`] for ±infinity
/// - [`DecodeError::LudicrousNotImplemented`] for the ludicrous zones
pub fn decode_integer(root: &[u8], zone: Zone) -> DecodeResult<BigInt> {
    match zone {
        Zone::Positive => {
            let canonical = collapse_plateau(root).unwrap_or_else(|| root.to_vec());
            let qan = qan_raw(&canonical, zone, None)?;
            let shift = base_256_exponent(&canonical, zone)? - qigit_count(qan);
            Ok(BigInt::from(shift_qigits(unpack_integer(qan), shift)))
        }
        Zone::Negative => {
            // Magnitude of the two's complement qan, shifted, so truncation goes toward zero.
            let canonical = collapse_plateau(root).unwrap_or_else(|| root.to_vec());
            let qan = qan_raw(&canonical, zone, None)?;
            let magnitude = exp256(qan.len()) - unpack_integer(qan);
            let shift = base_256_exponent(&canonical, zone)? - qigit_count(qan);
            Ok(-BigInt::from(shift_qigits(magnitude, shift)))
        }
        Zone::Fractional
        | Zone::Infinitesimal
        | Zone::Zero
        | Zone::InfinitesimalNeg
        | Zone::FractionalNeg => Ok(BigInt::zero()),
        Zone::Transfinite | Zone::TransfiniteNeg => Err(DecodeError::IntOverflow(zone.to_string())),
        Zone::LudicrousLarge
        | Zone::LudicrousSmall
        | Zone::LudicrousSmallNeg
        | Zone::LudicrousLargeNeg => Err(DecodeError::LudicrousNotImplemented(zone.to_string())),
        Zone::NaN => Err(DecodeError::NanToInt),
    }
}

/// The `f64` nearest a root.
///
/// Reasonable roots use their first ten qigits. Transfinite roots are ±infinity and
/// infinitesimal ones ±0.0.
///
/// # Errors
///
/// Returns [`DecodeError::LudicrousNotImplemented`] for the ludicrous zones.
pub fn decode_float(root: &[u8], zone: Zone) -> DecodeResult<f64> {
    match zone {
        Zone::Positive | Zone::Fractional | Zone::FractionalNeg | Zone::Negative => {
            Ok(reasonable_float(root, zone))
        }
        Zone::Transfinite => Ok(f64::INFINITY),
        Zone::Infinitesimal | Zone::Zero => Ok(0.0),
        Zone::InfinitesimalNeg => Ok(-0.0),
        Zone::TransfiniteNeg => Ok(f64::NEG_INFINITY),
        Zone::NaN => Ok(f64::NAN),
        Zone::LudicrousLarge
        | Zone::LudicrousSmall
        | Zone::LudicrousSmallNeg
        | Zone::LudicrousLargeNeg => Err(DecodeError::LudicrousNotImplemented(zone.to_string())),
    }
}

fn reasonable_float(root: &[u8], zone: Zone) -> f64 {
    let negative = root < RAW_ZERO;
    let Ok(exponent) = base_256_exponent(root, zone) else {
        // qex cut short, e.g. 0q81
        return if negative { -0.0 } else { 0.0 };
    };
    let qan = qan_raw(root, zone, Some(FLOAT_DECODE_QIGITS)).unwrap_or_default();
    let mut qan_len = qan.len();
    let mut qan_int = qan.iter().fold(0_i128, |acc, &b| (acc << 8) | i128::from(b));

    // Plateau aliases decode as their canonical single qigit.
    if negative {
        qan_int -= 1 << (8 * qan_len);
        if qan_len > 0 && qan_int >= -(1 << (8 * (qan_len - 1))) {
            (qan_int, qan_len) = (-1, 1);
        }
    } else if qan_len == 0 || qan_int <= 1 << (8 * (qan_len - 1)) {
        (qan_int, qan_len) = (1, 1);
    }

    #[allow(clippy::cast_precision_loss)]
    let significand = qan_int as f64;
    ldexp(significand, 8 * (exponent - qigit_count_of(qan_len)))
}

pub(crate) fn qigit_count(qan: &[u8]) -> i32 {
    qigit_count_of(qan.len())
}

fn qigit_count_of(len: usize) -> i32 {
    i32::try_from(len).unwrap_or(i32::MAX)
}

/// `value × 256^shift`, truncating when `shift` is negative.
fn shift_qigits(value: BigUint, shift: i32) -> BigUint {
    let bits = 8 * shift.unsigned_abs() as usize;
    if shift >= 0 {
        value << bits
    } else {
        value >> bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(qstring: &str) -> Vec<u8> {
        hex::decode(qstring.trim_start_matches("0q").replace('_', "")).unwrap()
    }

    fn int_of(qstring: &str) -> BigInt {
        let root = raw(qstring);
        decode_integer(&root, Zone::of(&root)).unwrap()
    }

    fn float_of(qstring: &str) -> f64 {
        let root = raw(qstring);
        decode_float(&root, Zone::of(&root)).unwrap()
    }

    #[test]
    fn test_decode_integers() {
        let cases: [(&str, i64); 12] = [
            ("0q82_01", 1),
            ("0q82_FF", 255),
            ("0q83_01", 256),
            ("0q83_0101", 257),
            ("0q83_FFFF", 65535),
            ("0q84_01", 65536),
            ("0q7D_FF", -1),
            ("0q7D_80", -128),
            ("0q7D_01", -255),
            ("0q7C_FF", -256),
            ("0q7C_FEFF", -257),
            ("0q7B_FF", -65536),
        ];
        for (qstring, expected) in cases {
            assert_eq!(int_of(qstring), BigInt::from(expected), "{qstring}");
        }
    }

    #[test]
    fn test_decode_integer_plateaus() {
        assert_eq!(int_of("0q82"), BigInt::from(1));
        assert_eq!(int_of("0q82_00C0"), BigInt::from(1));
        assert_eq!(int_of("0q7E"), BigInt::from(-1));
        assert_eq!(int_of("0q7D"), BigInt::from(-256));
        assert_eq!(int_of("0q7C_FFFF"), BigInt::from(-256));
        assert_eq!(int_of("0q7C_FF80"), BigInt::from(-256));
        assert_eq!(int_of("0q7D_FFDEADBEEF"), BigInt::from(-1));
    }

    #[test]
    fn test_decode_integer_truncates_toward_zero() {
        // 1.5 and -1.5
        assert_eq!(int_of("0q82_0180"), BigInt::from(1));
        assert_eq!(int_of("0q7D_FE80"), BigInt::from(-1));
        assert_eq!(int_of("0q7D_FD80"), BigInt::from(-2));
        assert_eq!(int_of("0q81FF_80"), BigInt::zero());
        assert_eq!(int_of("0q7E00_80"), BigInt::zero());
    }

    #[test]
    fn test_decode_integer_errors() {
        assert_eq!(decode_integer(&[], Zone::NaN), Err(DecodeError::NanToInt));
        assert!(matches!(
            decode_integer(&[0xFF, 0x81], Zone::Transfinite),
            Err(DecodeError::IntOverflow(_))
        ));
        assert!(matches!(
            decode_integer(&[0xFF, 0x00, 0x00, 0x80], Zone::LudicrousLarge),
            Err(DecodeError::LudicrousNotImplemented(_))
        ));
    }

    #[test]
    fn test_decode_floats() {
        assert_eq!(float_of("0q82_01"), 1.0);
        assert_eq!(float_of("0q81FF_80"), 0.5);
        assert_eq!(float_of("0q7E00_80"), -0.5);
        assert_eq!(float_of("0q82_0280"), 2.5);
        assert_eq!(float_of("0q7D_FD80"), -2.5);
        assert_eq!(float_of("0q83_03E8"), 1000.0);
        assert_eq!(float_of("0q82_03243F6A8885A3"), std::f64::consts::PI);
        assert_eq!(float_of("0q8183_01"), ldexp(1.0, -1000));
        assert_eq!(float_of("0q7E7C_FF"), -ldexp(1.0, -1000));
    }

    #[test]
    fn test_decode_float_edges() {
        let positive_zero = float_of("0q81");
        assert_eq!(positive_zero, 0.0);
        assert!(positive_zero.is_sign_positive());
        let negative_zero = float_of("0q7EFF");
        assert_eq!(negative_zero, 0.0);
        assert!(negative_zero.is_sign_negative());
        assert_eq!(float_of("0q82"), 1.0);
        assert_eq!(float_of("0q7E"), -1.0);
        assert_eq!(float_of("0qFF_81"), f64::INFINITY);
        assert_eq!(float_of("0q00_7F"), f64::NEG_INFINITY);
        assert!(float_of("0q").is_nan());
    }

    #[test]
    fn test_exponent_and_qan() {
        let root = raw("0q7E00_FF");
        assert_eq!(base_256_exponent(&root, Zone::FractionalNeg), Ok(0));
        let root = raw("0q7E01_FF");
        assert_eq!(base_256_exponent(&root, Zone::FractionalNeg), Ok(-1));
        assert_eq!(base_256_exponent(&[0x01], Zone::Negative), Ok(125));
        assert_eq!(base_256_exponent(&[0x81], Zone::Fractional), Err(DecodeError::QexUndefined(Zone::Fractional)));
        assert_eq!(base_256_exponent(&[0x80], Zone::Zero), Err(DecodeError::QexUndefined(Zone::Zero)));

        let root = raw("0q83_03E8");
        assert_eq!(qex_raw(&root, Zone::Positive), Ok(&[0x83][..]));
        assert_eq!(qan_raw(&root, Zone::Positive, None), Ok(&[0x03, 0xE8][..]));
        assert_eq!(qan_raw(&root, Zone::Positive, Some(1)), Ok(&[0x03][..]));
        assert_eq!(qan_raw(&[0x80], Zone::Zero, None), Err(DecodeError::QanUndefined(Zone::Zero)));
    }
}
