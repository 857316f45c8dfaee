//! Escaped text encoding/decoding for the record wire format.

pub mod escape;
pub mod message;
pub mod scanner;

pub use escape::{escape, unescape};
pub use message::{
    decode_message, decode_record, encode_message, encode_record, MessageHeader,
    DEFAULT_MESSAGE_TYPE, MESSAGE_VERSION,
};
pub use scanner::Scanner;
