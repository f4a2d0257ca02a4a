//! # qiki-number
//!
//! A self-describing binary encoding for numbers, in which **unsigned byte-string comparison
//! of two encodings reproduces the numeric order of the values**.
//!
//! One format ("raw") covers:
//!
//! - **Integers** of any size up to 256^125 in magnitude, exactly
//! - **Floats** in the `f64` range, at a chosen precision of base-256 digits ("qigits")
//! - **Complex numbers**, carried as a real value plus an imaginary suffix
//! - **Non-finite values**: NaN, ±infinity and ±infinitesimal
//! - **Suffixes**: typed, self-delimiting tags that ride along with a value
//!
//! ## Use Cases
//!
//! - Identifiers and sort keys in byte-oriented stores (`ORDER BY` on a binary column)
//! - Composite keys: a root identifier plus a typed suffix addressing a listed record
//!
//! ## Examples
//!
//! ```rust
//! use qiki_number::{Number, Qigits, SuffixType};
//!
//! // Integers encode exactly
//! let one = Number::from(1);
//! assert_eq!(one.to_string(), "0q82_01");
//! assert_eq!(one.as_bytes(), &[0x82, 0x01]);
//!
//! // Floats round to a number of qigits, 8 by default
//! let x = Number::from_f64(1.1, Qigits::new(2)).unwrap();
//! assert_eq!(x.to_string(), "0q82_011A");
//!
//! // Byte order is numeric order
//! let a = Number::from(-1);
//! let b = Number::try_from(0.5).unwrap();
//! assert!(a.as_bytes() < b.as_bytes());
//! assert!(a < b);
//!
//! // Suffixes attach typed payloads
//! let z = Number::zero().plus_suffix(SuffixType::IMAGINARY, &Number::from(2)).unwrap();
//! assert_eq!(z.real().unwrap(), Number::zero());
//! assert_eq!(z.imag().unwrap(), Number::from(2));
//! ```
//!
//! ## Format Overview
//!
//! A root raw is a **qex** (one or two exponent bytes) followed by a **qan** (the base-256
//! significand in two's complement, trailing zeros stripped). The first bytes place the
//! value in one of fourteen [`Zone`]s:
//!
//! | Zone | Boundary | Holds |
//! |---|---|---|
//! | Transfinite | `FF80` | +infinity |
//! | LudicrousLarge | `FF` | ≥ 256^125 (reserved) |
//! | Positive | `82` | 1 ≤ x < 256^125, qex `0x81 + e` |
//! | Fractional | `81` | 256^-125 ≤ x < 1, qex `81 (0xFF + e)` |
//! | LudicrousSmall | `8080` | reserved |
//! | Infinitesimal | `8000` | +infinitesimal |
//! | Zero | `80` | 0 |
//! | InfinitesimalNeg | `7F80` | -infinitesimal |
//! | LudicrousSmallNeg | `7F00` | reserved |
//! | FractionalNeg | `7E00` | -1 < x ≤ -256^-125, qex `7E (0x00 - e)` |
//! | Negative | `01` | -256^125 < x ≤ -1, qex `0x7E - e` |
//! | LudicrousLargeNeg | `0080` | reserved |
//! | TransfiniteNeg | `00` | -infinity |
//! | NaN | empty | NaN |
//!
//! A suffix is `payload ++ type ++ length ++ 00`, and suffixes chain to the right.

pub(crate) mod decoder;
pub(crate) mod encoder;
pub(crate) mod error;
pub(crate) mod normalize;
pub(crate) mod number;
pub(crate) mod ops;
pub(crate) mod pack;
pub(crate) mod qstring;
#[cfg(feature = "serde")]
pub(crate) mod serialize;
pub(crate) mod suffix;
pub(crate) mod zone;

// Re-export main types and functions
pub use encoder::{encode_float, encode_integer, Qigits};
pub use decoder::{base_256_exponent, decode_float, decode_integer, qan_offset};
pub use error::{DecodeError, DecodeResult, EncodeError, EncodeResult, Error};
pub use number::Number;
pub use pack::{exp256, pack_integer, right_strip00, unpack_integer};
pub use suffix::{Suffix, SuffixType, MAX_PAYLOAD_LENGTH, NUM_OVERHEAD, TERMINATOR};
pub use zone::Zone;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let value = Number::from(123_456_789);
        let restored = Number::from_raw(value.as_bytes());
        assert_eq!(value, restored);
        assert_eq!(i64::try_from(&restored), Ok(123_456_789));

        let restored = Number::from_qstring(&value.to_string()).unwrap();
        assert_eq!(value, restored);
    }

    #[test]
    fn test_order_preservation() {
        let numbers = [
            -100.0, -10.0, -1.5, -1.0, -0.5, 0.0, 0.5, 1.0, 1.5, 10.0, 100.0,
        ];

        let encoded: Vec<Number> = numbers
            .iter()
            .map(|&x| Number::try_from(x).unwrap())
            .collect();

        for i in 0..encoded.len() - 1 {
            assert!(
                encoded[i].as_bytes() < encoded[i + 1].as_bytes(),
                "Order not preserved: {} should be < {}",
                numbers[i],
                numbers[i + 1]
            );
        }
    }

    #[test]
    fn test_special_values() {
        assert!(Number::nan().is_nan());
        assert!(Number::zero().is_zero());
        assert!(!Number::infinity().is_finite());
        assert!(Number::from(1).is_positive());
        assert!(Number::from(-1).is_negative());
        assert!(Number::try_from(0.5).unwrap().is_reasonable());
        assert!(!Number::infinitesimal().is_reasonable());

        assert_eq!(Number::infinity().to_f64(), Ok(f64::INFINITY));
        assert_eq!(Number::neg_infinity().to_f64(), Ok(f64::NEG_INFINITY));
        assert_eq!(Number::infinitesimal().to_f64(), Ok(0.0));
        assert!(Number::neg_infinitesimal().to_f64().unwrap().is_sign_negative());
    }
}
