use thiserror::Error;

use crate::zone::Zone;

/// Errors raised while building a raw encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("Invalid q-string {0:?}: expected 0q followed by hexadecimal digits")]
    InvalidQstring(String),

    #[error("Invalid number text {0:?}: not a q-string, integer or float")]
    InvalidText(String),

    #[error("Ludicrous number {0} is not implemented")]
    LudicrousNotImplemented(String),

    #[error("Cannot suffix NaN")]
    SuffixNan,

    #[error("Suffix payload too long: {0} bytes, maximum is 250")]
    PayloadTooLong(usize),
}

/// Errors raised while taking a raw encoding apart
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Invalid suffix chain: {0}")]
    SuffixStructure(&'static str),

    #[error("No suffix of type {0:?} to remove")]
    NoSuchSuffix(Option<u8>),

    #[error("Zone {0} has no qex")]
    QexUndefined(Zone),

    #[error("Zone {0} has no qan")]
    QanUndefined(Zone),

    #[error("Integer overflow converting {0}")]
    IntOverflow(String),

    #[error("Cannot convert NaN to an integer")]
    NanToInt,

    #[error("Cannot convert {0} to a real number, it has an imaginary part")]
    ImaginaryPart(String),

    #[error("Complex numbers are unordered: {0} vs {1}")]
    Unordered(String, String),

    #[error("Ludicrous number {0} is not implemented")]
    LudicrousNotImplemented(String),
}

/// Either direction, for operations that decode and then re-encode
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Result type for encoding operations
pub type EncodeResult<T> = Result<T, EncodeError>;

/// Result type for decoding operations
pub type DecodeResult<T> = Result<T, DecodeError>;
