//! Canonical forms.
//!
//! Roots in the reasonably-nonzero zones have plateau aliases: an empty qan, or a qan that
//! opens with `00` (positive) or `FF` (negative), encodes the same value as a single-qigit
//! qan. `0q82` and `0q82_00C0` are both 1, canonically `0q82_01`.

use tracing::trace;

use crate::decoder::qan_offset;
use crate::encoder::RAW_ZERO;
use crate::error::DecodeResult;
use crate::suffix::{parse_suffixes, SuffixType};
use crate::zone::Zone;

/// The canonical form of a plateau root, or `None` if the root is not a plateau.
pub(crate) fn collapse_plateau(root: &[u8]) -> Option<Vec<u8>> {
    let zone = Zone::of(root);
    if !zone.is_reasonably_nonzero() {
        return None;
    }
    let offset = qan_offset(zone).ok()?;
    if root.len() < offset {
        return None;
    }
    let (qex, qan) = root.split_at(offset);
    let mut canonical = qex.to_vec();
    match (zone.is_positive(), qan.first()) {
        (true, None | Some(0x00)) => canonical.push(0x01),
        (false, None) => {
            if let Some(last) = canonical.last_mut() {
                *last = last.wrapping_sub(1);
            }
            canonical.push(0xFF);
        }
        (false, Some(0xFF)) => canonical.push(0xFF),
        _ => return None,
    }
    Some(canonical)
}

/// Normalize a raw: collapse a plateau root, keep its suffixes, and drop imaginary suffixes
/// if every one of them is zero.
///
/// # Errors
///
/// Returns [`DecodeError::SuffixStructure`](crate::DecodeError::SuffixStructure) if the
/// suffix chain is malformed.
pub(crate) fn normalize(raw: &[u8]) -> DecodeResult<Vec<u8>> {
    let (root, suffixes) = parse_suffixes(raw)?;
    let mut normalized = match collapse_plateau(root) {
        Some(canonical) => {
            trace!(
                from = %hex::encode_upper(root),
                to = %hex::encode_upper(&canonical),
                "collapsed plateau"
            );
            canonical
        }
        None => root.to_vec(),
    };

    let mut imaginaries = suffixes
        .iter()
        .filter(|suffix| suffix.type_() == Some(SuffixType::IMAGINARY))
        .peekable();
    let drop_imaginary = imaginaries.peek().is_some()
        && imaginaries.all(|suffix| normalize(suffix.payload()).is_ok_and(|p| p == RAW_ZERO));
    if drop_imaginary {
        trace!("dropped zero imaginary part");
    }

    for suffix in &suffixes {
        if drop_imaginary && suffix.type_() == Some(SuffixType::IMAGINARY) {
            continue;
        }
        normalized.extend(suffix.raw());
    }
    Ok(normalized)
}
