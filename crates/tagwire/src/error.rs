//! Error types for encoding, decoding, construction, and lookup.

use thiserror::Error;

use crate::model::TypeTag;

/// Error during binary or text decoding.
///
/// Both codecs share one failure family; every variant carries the context
/// needed to diagnose the input without re-running the decode. Any decode
/// error aborts the whole in-progress decode; there are no partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    BufferTooShort { context: &'static str },

    #[error("input length {len} exceeds maximum buffer size {max}")]
    BufferTooLarge { len: usize, max: usize },

    #[error("declared name length {len} exceeds maximum {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("declared payload size {len} exceeds maximum {max}")]
    ValueTooLarge { len: usize, max: usize },

    #[error("buffer underflow reading {context}: need {needed} bytes, {available} available")]
    BufferUnderflow {
        context: &'static str,
        needed: usize,
        available: usize,
    },

    #[error("nesting depth {depth} exceeds maximum {max}")]
    NestingTooDeep { depth: usize, max: usize },

    #[error("child record consumed {consumed} bytes, below minimum {min}")]
    ZeroProgress { consumed: usize, min: usize },

    #[error("unknown type tag: {tag}")]
    UnknownTypeTag { tag: u8 },

    #[error("type tag mismatch: expected {expected}, found {found}")]
    TypeTagMismatch { expected: TypeTag, found: TypeTag },

    #[error("{tag} record declares {declared} payload bytes, expected {expected}")]
    PayloadSizeMismatch {
        tag: TypeTag,
        declared: usize,
        expected: usize,
    },

    #[error("invalid bool payload: {value} (expected 0x00 or 0x01)")]
    InvalidBool { value: u8 },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("{remaining} trailing bytes after root record")]
    TrailingBytes { remaining: usize },

    // === Text codec ===
    #[error("missing @header section")]
    MissingHeader,

    #[error("missing @data section")]
    MissingData,

    #[error("unknown type name: {name:?}")]
    UnknownTypeName { name: String },

    #[error("unknown header field number: {field}")]
    UnknownHeaderField { field: u32 },

    #[error("malformed record: {context}")]
    MalformedRecord { context: &'static str },

    #[error("malformed container payload: {context}")]
    MalformedContainer { context: &'static str },

    #[error("bad escape sequence: {context}")]
    BadEscape { context: &'static str },

    #[error("bytes payload is not an even-length hex string")]
    BadHexDigit,

    #[error("malformed {field} payload: not a valid number")]
    BadNumber { field: &'static str },

    // === Propagated construction failures ===
    #[error(transparent)]
    Value(#[from] ValueError),
}

/// Error during binary or text encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("name length {len} exceeds maximum {max}")]
    NameTooLong { len: usize, max: usize },

    #[error("payload size {len} exceeds maximum {max}")]
    ValueTooLarge { len: usize, max: usize },

    #[error("encoded output length {len} exceeds maximum buffer size {max}")]
    BufferTooLarge { len: usize, max: usize },
}

/// Error constructing a range-checked numeric value.
///
/// Always returned as data, never raised as a panic, for all bounded
/// numeric variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    #[error("{tag} value {value} outside allowed range [{min}, {max}]")]
    OutOfRange {
        tag: TypeTag,
        value: i64,
        min: i64,
        max: i64,
    },
}

/// Error looking up a value in a container.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("no value named {name:?}")]
    NameNotFound { name: String },

    #[error("value {name:?} has type {found}, expected {expected}")]
    TypeMismatch {
        name: String,
        expected: TypeTag,
        found: TypeTag,
    },
}
