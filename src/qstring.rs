//! Text forms of a raw: the `0q` q-string and a few hex renderings.

use std::fmt::Write as _;

use crate::error::{EncodeError, EncodeResult};
use crate::suffix::parse_suffixes;

pub(crate) const PREFIX: &str = "0q";

/// q-string with `_` between qex and qan, and `__` before each suffix.
///
/// A raw whose suffix chain does not parse renders whole, as a root, tagged `!?`.
pub(crate) fn qstring(raw: &[u8]) -> String {
    match parse_suffixes(raw) {
        Ok((root, suffixes)) => {
            let mut out = root_qstring(root);
            for suffix in &suffixes {
                out.push_str("__");
                out.push_str(&suffix.qstring());
            }
            out
        }
        Err(_) => root_qstring(raw) + "!?",
    }
}

/// q-string with no underscores.
pub(crate) fn qstring_plain(raw: &[u8]) -> String {
    format!("{PREFIX}{}", hex::encode_upper(raw))
}

fn root_qstring(root: &[u8]) -> String {
    // qex length: two bytes around zero, one elsewhere
    let offset = match root.first() {
        None => 0,
        Some(0x7E | 0x7F | 0x80 | 0x81) => 2,
        Some(_) => 1,
    };
    let digits = hex::encode_upper(root);
    if root.len() <= offset {
        format!("{PREFIX}{digits}")
    } else {
        let (qex, qan) = digits.split_at(2 * offset);
        format!("{PREFIX}{qex}_{qan}")
    }
}

/// Raw bytes of a q-string. Underscores are ignored and an odd digit count gets a
/// trailing `0`.
pub(crate) fn parse_qstring(text: &str) -> EncodeResult<Vec<u8>> {
    let invalid = || EncodeError::InvalidQstring(text.to_string());
    let digits = text.strip_prefix(PREFIX).ok_or_else(invalid)?;
    let mut digits: String = digits.chars().filter(|&c| c != '_').collect();
    if digits.len() % 2 == 1 {
        digits.push('0');
    }
    hex::decode(&digits).map_err(|_| invalid())
}

/// `x'8201'`, a MySQL hex literal.
pub(crate) fn x_apostrophe_hex(raw: &[u8]) -> String {
    format!("x'{}'", hex::encode_upper(raw))
}

/// `0x8201`
pub(crate) fn zero_x_hex(raw: &[u8]) -> String {
    format!("0x{}", hex::encode_upper(raw))
}

/// `"\x82\x01"`, a C string literal.
pub(crate) fn c_string(raw: &[u8]) -> String {
    let mut out = String::with_capacity(4 * raw.len() + 2);
    out.push('"');
    for byte in raw {
        let _ = write!(out, "\\x{byte:02X}");
    }
    out.push('"');
    out
}
