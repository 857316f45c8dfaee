//! Safety limits for encoding and decoding.
//!
//! All tunable bounds live in [`Limits`], one immutable value threaded
//! explicitly into every codec entry point. Tests tighten individual fields
//! on a local copy instead of mutating global state.

/// Fixed size of a binary record header: tag (1) + name length (4) +
/// payload size (4).
pub const RECORD_HEADER_LEN: usize = 9;

/// Bounds consulted by both the binary and the text codec.
///
/// The defaults are safe for untrusted input; callers that know their peers
/// can raise them, fuzzers and tests can lower them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum value-name length in bytes.
    pub max_name_len: usize,
    /// Maximum declared payload size of a single record, in bytes.
    pub max_value_size: usize,
    /// Maximum total buffer (binary) or text (escaped) length, in bytes.
    pub max_buffer_size: usize,
    /// Maximum composite nesting depth. The root record sits at depth 1,
    /// so a tree of `max_nesting_depth - 1` nested composites decodes and
    /// one level deeper fails.
    pub max_nesting_depth: usize,
    /// Minimum number of bytes a single child decode must consume inside a
    /// composite payload. Guards against malformed records that would make
    /// the child loop spin without progress.
    pub min_bytes_read: usize,
}

impl Limits {
    /// Default maximum name length (1 KiB).
    pub const DEFAULT_MAX_NAME_LEN: usize = 1024;
    /// Default maximum payload size (16 MiB).
    pub const DEFAULT_MAX_VALUE_SIZE: usize = 16 * 1024 * 1024;
    /// Default maximum buffer size (64 MiB).
    pub const DEFAULT_MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;
    /// Default maximum nesting depth.
    pub const DEFAULT_MAX_NESTING_DEPTH: usize = 100;
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_name_len: Self::DEFAULT_MAX_NAME_LEN,
            max_value_size: Self::DEFAULT_MAX_VALUE_SIZE,
            max_buffer_size: Self::DEFAULT_MAX_BUFFER_SIZE,
            max_nesting_depth: Self::DEFAULT_MAX_NESTING_DEPTH,
            min_bytes_read: RECORD_HEADER_LEN,
        }
    }
}
