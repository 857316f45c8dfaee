//! Binary encoding/decoding for the record wire format.

pub mod primitives;
pub mod record;

pub use primitives::{Reader, Writer};
pub use record::{decode_array, decode_container, decode_value, decode_value_at, encode_value};
