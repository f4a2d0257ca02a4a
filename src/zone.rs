//! Zones: contiguous ranges of raw values, each with its own layout rules.
//!
//! Every zone has a boundary raw, the infimum of the raws belonging to it. Some boundaries are
//! themselves valid encodings, others sit between zones and are only used for comparison.

use std::fmt;

/// The fourteen zones, declared from the lowest raw to the highest so the derived [`Ord`]
/// agrees with raw byte order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Zone {
    NaN,
    TransfiniteNeg,
    LudicrousLargeNeg,
    Negative,
    FractionalNeg,
    LudicrousSmallNeg,
    InfinitesimalNeg,
    Zero,
    Infinitesimal,
    LudicrousSmall,
    Fractional,
    Positive,
    LudicrousLarge,
    Transfinite,
}

impl Zone {
    /// All zones, highest boundary first (the order a linear scan visits them).
    pub const DESCENDING: [Zone; 14] = [
        Zone::Transfinite,
        Zone::LudicrousLarge,
        Zone::Positive,
        Zone::Fractional,
        Zone::LudicrousSmall,
        Zone::Infinitesimal,
        Zone::Zero,
        Zone::InfinitesimalNeg,
        Zone::LudicrousSmallNeg,
        Zone::FractionalNeg,
        Zone::Negative,
        Zone::LudicrousLargeNeg,
        Zone::TransfiniteNeg,
        Zone::NaN,
    ];

    /// The zone's boundary raw (bit-exact, used by interoperating stores).
    #[must_use]
    pub const fn boundary(self) -> &'static [u8] {
        match self {
            Zone::Transfinite => &[0xFF, 0x80],
            Zone::LudicrousLarge => &[0xFF],
            Zone::Positive => &[0x82],
            Zone::Fractional => &[0x81],
            Zone::LudicrousSmall => &[0x80, 0x80],
            Zone::Infinitesimal => &[0x80, 0x00],
            Zone::Zero => &[0x80],
            Zone::InfinitesimalNeg => &[0x7F, 0x80],
            Zone::LudicrousSmallNeg => &[0x7F, 0x00],
            Zone::FractionalNeg => &[0x7E, 0x00],
            Zone::Negative => &[0x01],
            Zone::LudicrousLargeNeg => &[0x00, 0x80],
            Zone::TransfiniteNeg => &[0x00],
            Zone::NaN => &[],
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Transfinite => "TRANSFINITE",
            Zone::LudicrousLarge => "LUDICROUS_LARGE",
            Zone::Positive => "POSITIVE",
            Zone::Fractional => "FRACTIONAL",
            Zone::LudicrousSmall => "LUDICROUS_SMALL",
            Zone::Infinitesimal => "INFINITESIMAL",
            Zone::Zero => "ZERO",
            Zone::InfinitesimalNeg => "INFINITESIMAL_NEG",
            Zone::LudicrousSmallNeg => "LUDICROUS_SMALL_NEG",
            Zone::FractionalNeg => "FRACTIONAL_NEG",
            Zone::Negative => "NEGATIVE",
            Zone::LudicrousLargeNeg => "LUDICROUS_LARGE_NEG",
            Zone::TransfiniteNeg => "TRANSFINITE_NEG",
            Zone::NaN => "NAN",
        }
    }

    /// Classify a raw with a tree of boundary comparisons.
    ///
    /// At most four comparisons; common numbers take two or three.
    #[must_use]
    pub fn of(raw: &[u8]) -> Zone {
        if raw > Zone::Zero.boundary() {
            if raw >= Zone::Positive.boundary() {
                if raw >= Zone::LudicrousLarge.boundary() {
                    if raw >= Zone::Transfinite.boundary() {
                        Zone::Transfinite
                    } else {
                        Zone::LudicrousLarge
                    }
                } else {
                    Zone::Positive
                }
            } else if raw >= Zone::Fractional.boundary() {
                Zone::Fractional
            } else if raw >= Zone::LudicrousSmall.boundary() {
                Zone::LudicrousSmall
            } else {
                Zone::Infinitesimal
            }
        } else if raw == Zone::Zero.boundary() {
            Zone::Zero
        } else if raw >= Zone::FractionalNeg.boundary() {
            if raw >= Zone::LudicrousSmallNeg.boundary() {
                if raw >= Zone::InfinitesimalNeg.boundary() {
                    Zone::InfinitesimalNeg
                } else {
                    Zone::LudicrousSmallNeg
                }
            } else {
                Zone::FractionalNeg
            }
        } else if raw >= Zone::Negative.boundary() {
            Zone::Negative
        } else if raw >= Zone::LudicrousLargeNeg.boundary() {
            Zone::LudicrousLargeNeg
        } else if raw >= Zone::TransfiniteNeg.boundary() {
            Zone::TransfiniteNeg
        } else {
            Zone::NaN
        }
    }

    /// Classify a raw by scanning boundaries from the top down.
    ///
    /// Slower than [`Zone::of`] but written independently of it; the two must always agree.
    #[must_use]
    pub fn by_scan(raw: &[u8]) -> Zone {
        Zone::DESCENDING
            .into_iter()
            .find(|zone| zone.boundary() <= raw)
            .unwrap_or(Zone::NaN)
    }

    // Zone sets
    // ---------

    /// Finite and within 256^-125 .. 256^125 in magnitude, or zero.
    #[must_use]
    pub const fn is_reasonable(self) -> bool {
        matches!(
            self,
            Zone::Positive | Zone::Fractional | Zone::Zero | Zone::FractionalNeg | Zone::Negative
        )
    }

    #[must_use]
    pub const fn is_ludicrous(self) -> bool {
        matches!(
            self,
            Zone::LudicrousLarge
                | Zone::LudicrousSmall
                | Zone::LudicrousSmallNeg
                | Zone::LudicrousLargeNeg
        )
    }

    #[must_use]
    pub const fn is_nonfinite(self) -> bool {
        matches!(
            self,
            Zone::Transfinite | Zone::Infinitesimal | Zone::InfinitesimalNeg | Zone::TransfiniteNeg
        )
    }

    #[must_use]
    pub const fn is_finite(self) -> bool {
        self.is_reasonable() || self.is_ludicrous()
    }

    #[must_use]
    pub const fn is_unreasonable(self) -> bool {
        self.is_ludicrous() || self.is_nonfinite()
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(
            self,
            Zone::Transfinite
                | Zone::LudicrousLarge
                | Zone::Positive
                | Zone::Fractional
                | Zone::LudicrousSmall
                | Zone::Infinitesimal
        )
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        matches!(
            self,
            Zone::InfinitesimalNeg
                | Zone::LudicrousSmallNeg
                | Zone::FractionalNeg
                | Zone::Negative
                | Zone::LudicrousLargeNeg
                | Zone::TransfiniteNeg
        )
    }

    #[must_use]
    pub const fn is_nonzero(self) -> bool {
        self.is_positive() || self.is_negative()
    }

    /// Zones whose roots have a qex and a qan, and so can have plateau aliases.
    #[must_use]
    pub const fn is_reasonably_nonzero(self) -> bool {
        matches!(
            self,
            Zone::Positive | Zone::Fractional | Zone::FractionalNeg | Zone::Negative
        )
    }

    #[must_use]
    pub const fn is_essentially_positive_zero(self) -> bool {
        matches!(self, Zone::LudicrousSmall | Zone::Infinitesimal)
    }

    #[must_use]
    pub const fn is_essentially_negative_zero(self) -> bool {
        matches!(self, Zone::InfinitesimalNeg | Zone::LudicrousSmallNeg)
    }

    #[must_use]
    pub const fn is_unreasonably_big(self) -> bool {
        matches!(
            self,
            Zone::Transfinite | Zone::LudicrousLarge | Zone::LudicrousLargeNeg | Zone::TransfiniteNeg
        )
    }

    /// Never an integer.
    #[must_use]
    pub const fn is_whole_no(self) -> bool {
        matches!(
            self,
            Zone::Fractional
                | Zone::LudicrousSmall
                | Zone::Infinitesimal
                | Zone::InfinitesimalNeg
                | Zone::LudicrousSmallNeg
                | Zone::FractionalNeg
        )
    }

    /// Always an integer.
    #[must_use]
    pub const fn is_whole_yes(self) -> bool {
        matches!(self, Zone::Zero)
    }

    /// An integer or not, depending on the qan.
    #[must_use]
    pub const fn is_whole_maybe(self) -> bool {
        matches!(self, Zone::Positive | Zone::Negative)
    }

    /// Wholeness is not a meaningful question.
    #[must_use]
    pub const fn is_whole_indeterminate(self) -> bool {
        matches!(
            self,
            Zone::Transfinite | Zone::LudicrousLarge | Zone::LudicrousLargeNeg | Zone::TransfiniteNeg
        )
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
