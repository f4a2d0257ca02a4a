//! Base-256 packing of arbitrary-precision integers.
//!
//! Packed bytes are big-endian "unsigned two's complement": a negative integer packs as
//! `value + 256^n`, so there is no sign bit unless `n` leaves room for one.

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Zero};

/// Pack an integer into `num_bytes` bytes, or the minimum that holds its magnitude.
///
/// With an explicit `num_bytes` the low-order bytes are kept and higher ones discarded.
///
/// ```
/// use num_bigint::BigInt;
/// use qiki_number::pack_integer;
///
/// assert_eq!(pack_integer(&BigInt::from(255), None), [0xFF]);
/// assert_eq!(pack_integer(&BigInt::from(-255), None), [0x01]);
/// assert_eq!(pack_integer(&BigInt::from(-170), Some(2)), [0xFF, 0x56]);
/// ```
#[must_use]
pub fn pack_integer(value: &BigInt, num_bytes: Option<usize>) -> Vec<u8> {
    let num_bytes = num_bytes.unwrap_or_else(|| minimum_bytes(value.magnitude()));
    let modulus = BigInt::one() << (8 * num_bytes);
    let mut twos = value % &modulus;
    if twos.sign() == Sign::Minus {
        twos += &modulus;
    }
    let (_, magnitude) = twos.to_bytes_be();
    fit_left(&magnitude, num_bytes)
}

/// Integer value of big-endian bytes, with no sign interpretation.
#[must_use]
pub fn unpack_integer(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// `256^n`
#[must_use]
pub fn exp256(n: usize) -> BigUint {
    BigUint::one() << (8 * n)
}

/// Drop trailing zero bytes.
#[must_use]
pub fn right_strip00(bytes: &[u8]) -> &[u8] {
    let end = bytes.iter().rposition(|&b| b != 0x00).map_or(0, |i| i + 1);
    &bytes[..end]
}

/// Bytes needed for a magnitude: `floor(log256(m)) + 1`, and one byte for zero.
fn minimum_bytes(magnitude: &BigUint) -> usize {
    if magnitude.is_zero() {
        1
    } else {
        usize::try_from(magnitude.bits().div_ceil(8)).unwrap_or(usize::MAX)
    }
}

/// Left-pad with zeros, or keep only the last `len` bytes.
fn fit_left(bytes: &[u8], len: usize) -> Vec<u8> {
    if bytes.len() >= len {
        bytes[bytes.len() - len..].to_vec()
    } else {
        let mut out = vec![0x00; len - bytes.len()];
        out.extend_from_slice(bytes);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pack(value: i64, num_bytes: Option<usize>) -> Vec<u8> {
        pack_integer(&BigInt::from(value), num_bytes)
    }

    #[test]
    fn test_pack_minimal() {
        assert_eq!(pack(0, None), [0x00]);
        assert_eq!(pack(1, None), [0x01]);
        assert_eq!(pack(255, None), [0xFF]);
        assert_eq!(pack(256, None), [0x01, 0x00]);
        assert_eq!(pack(-1, None), [0xFF]);
        assert_eq!(pack(-255, None), [0x01]);
        assert_eq!(pack(-256, None), [0xFF, 0x00]);
        assert_eq!(pack(-257, None), [0xFE, 0xFF]);
    }

    #[test]
    fn test_pack_fixed_width() {
        assert_eq!(pack(255, Some(2)), [0x00, 0xFF]);
        assert_eq!(pack(-255, Some(2)), [0xFF, 0x01]);
        assert_eq!(pack(170, Some(2)), [0x00, 0xAA]);
        assert_eq!(pack(-170, Some(2)), [0xFF, 0x56]);
        assert_eq!(pack(42, Some(1)), [0x2A]);
    }

    #[test]
    fn test_pack_narrower_than_minimum_keeps_low_bytes() {
        assert_eq!(pack(0x1111, Some(1)), [0x11]);
        assert_eq!(pack(-0x5555, Some(1)), [0xAB]);
        assert_eq!(pack(0x1234, Some(0)), Vec::<u8>::new());
    }

    #[test]
    fn test_pack_big() {
        let big = BigInt::one() << 999;
        let packed = pack_integer(&big, None);
        assert_eq!(packed.len(), 125);
        assert_eq!(packed[0], 0x80);
        assert!(packed[1..].iter().all(|&b| b == 0));

        let packed = pack_integer(&-big, None);
        assert_eq!(packed.len(), 125);
        assert_eq!(packed[0], 0x80);
    }

    #[test]
    fn test_unpack() {
        assert_eq!(unpack_integer(&[0x00, 0xAA]), BigUint::from(170_u32));
        assert_eq!(unpack_integer(&[]), BigUint::zero());
        assert_eq!(exp256(2), BigUint::from(65536_u32));
    }

    #[test]
    fn test_right_strip00() {
        assert_eq!(right_strip00(b"string\x00\x00"), b"string");
        assert_eq!(right_strip00(&[0x00, 0x00]), b"");
        assert_eq!(right_strip00(&[0x00, 0x01]), &[0x00, 0x01]);
    }
}
