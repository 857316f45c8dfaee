//! Tagwire: named, type-tagged records over binary and text wires.
//!
//! This crate models data as named values drawn from sixteen types (null,
//! bool, eight integer widths, two float widths, string, raw bytes, and the
//! two composites: container and array), and encodes them in two
//! interchangeable wire formats.
//!
//! # Quick Start
//!
//! ```rust
//! use tagwire::{Container, Limits, Value};
//! use tagwire::codec::{decode_value, encode_value};
//!
//! let mut user = Container::new();
//! user.add(Value::string("name", "Alice"));
//! user.add(Value::int("age", 30)?);
//! let record = Value::container("user", user);
//!
//! // Encode to the binary wire and back
//! let limits = Limits::default();
//! let bytes = encode_value(&record, &limits)?;
//! let decoded = decode_value(&bytes, &limits)?;
//! assert_eq!(decoded, record);
//!
//! // Typed lookup by name
//! let user = decoded.as_container().unwrap();
//! assert_eq!(user.get("age")?.as_i32(), Some(30));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`model`]: Core data types (Value, Container, Array, TypeTag)
//! - [`codec`]: Binary encoding/decoding
//! - [`text`]: Escaped text encoding/decoding and message framing
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Security
//!
//! Both decoders are designed to safely handle untrusted input:
//! - Every allocation is bounded by configurable [`Limits`]
//! - Nesting depth is capped to keep recursion shallow
//! - Invalid data is rejected with descriptive errors
//!
//! # Wire Formats
//!
//! The binary wire frames every value as a self-describing record:
//!
//! ```text
//! [tag: 1 byte][name_len: u32 LE][name][payload_size: u32 LE][payload]
//! ```
//!
//! Composite payloads are the concatenation of their children's records, so
//! any subtree can be sliced out and decoded on its own.
//!
//! The text wire renders the same records as escaped, human-readable
//! `[name,type,payload];` triples, optionally framed in an
//! `@header{{...}};@data{{...}};` message envelope. See [`text`].

pub mod codec;
pub mod error;
pub mod limits;
pub mod model;
pub mod text;

// Re-export commonly used types at crate root
pub use codec::{decode_array, decode_container, decode_value, decode_value_at, encode_value};
pub use error::{DecodeError, EncodeError, LookupError, ValueError};
pub use limits::Limits;
pub use model::{Array, Container, Payload, TypeTag, Value};
pub use text::{decode_message, decode_record, encode_message, encode_record, MessageHeader};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
