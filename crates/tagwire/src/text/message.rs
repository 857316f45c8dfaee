//! Message-level encode/decode for the text wire grammar.
//!
//! ```text
//! message := "@header" "{{" field* "}}" ";"  "@data" "{{" record* "}}" ";"
//! field   := "[" digits "," escaped-text "]" ";"
//! record  := "[" escaped-name "," type-name "," escaped-payload "]" ";"
//! ```
//!
//! Header fields are numbered 1-6. The message type and message version are
//! always emitted; the four routing fields are omitted when the message type
//! equals [`DEFAULT_MESSAGE_TYPE`].
//!
//! Per-variant payload text: Bool is `true`/`false`, integers are decimal,
//! floats use the shortest round-tripping decimal form, String is escaped
//! UTF-8, Bytes is lowercase hex, Null is empty. A Container renders as
//! `@<escaped-name>{{<records>}}`; an Array is the concatenation of its
//! elements' records, each with an elided (empty) name.

use crate::error::{DecodeError, EncodeError};
use crate::limits::Limits;
use crate::model::{Array, Container, Payload, TypeTag, Value};
use crate::text::escape::{escape_into, unescape};
use crate::text::scanner::Scanner;

/// Message type for which the routing header fields are elided.
pub const DEFAULT_MESSAGE_TYPE: &str = "data_message";

/// Wire grammar version emitted in header field 6.
pub const MESSAGE_VERSION: &str = "1.0";

const FIELD_TARGET_ID: u32 = 1;
const FIELD_TARGET_SUB_ID: u32 = 2;
const FIELD_SOURCE_ID: u32 = 3;
const FIELD_SOURCE_SUB_ID: u32 = 4;
const FIELD_MESSAGE_TYPE: u32 = 5;
const FIELD_MESSAGE_VERSION: u32 = 6;

/// Routing and versioning fields carried by the `@header` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    pub target_id: String,
    pub target_sub_id: String,
    pub source_id: String,
    pub source_sub_id: String,
    pub message_type: String,
    pub message_version: String,
}

impl Default for MessageHeader {
    fn default() -> Self {
        Self {
            target_id: String::new(),
            target_sub_id: String::new(),
            source_id: String::new(),
            source_sub_id: String::new(),
            message_type: DEFAULT_MESSAGE_TYPE.to_string(),
            message_version: MESSAGE_VERSION.to_string(),
        }
    }
}

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a header and a sequence of values as one text message.
pub fn encode_message(
    header: &MessageHeader,
    values: &[Value],
    limits: &Limits,
) -> Result<String, EncodeError> {
    let mut out = String::new();
    out.push_str("@header{{");
    if header.message_type != DEFAULT_MESSAGE_TYPE {
        push_field(&mut out, FIELD_TARGET_ID, &header.target_id);
        push_field(&mut out, FIELD_TARGET_SUB_ID, &header.target_sub_id);
        push_field(&mut out, FIELD_SOURCE_ID, &header.source_id);
        push_field(&mut out, FIELD_SOURCE_SUB_ID, &header.source_sub_id);
    }
    push_field(&mut out, FIELD_MESSAGE_TYPE, &header.message_type);
    push_field(&mut out, FIELD_MESSAGE_VERSION, &header.message_version);
    out.push_str("}};@data{{");
    for value in values {
        encode_record_into(&mut out, value, limits, false)?;
    }
    out.push_str("}};");

    if out.len() > limits.max_buffer_size {
        return Err(EncodeError::BufferTooLarge {
            len: out.len(),
            max: limits.max_buffer_size,
        });
    }
    Ok(out)
}

/// Encodes a single value as one text record.
pub fn encode_record(value: &Value, limits: &Limits) -> Result<String, EncodeError> {
    let mut out = String::new();
    encode_record_into(&mut out, value, limits, false)?;
    if out.len() > limits.max_buffer_size {
        return Err(EncodeError::BufferTooLarge {
            len: out.len(),
            max: limits.max_buffer_size,
        });
    }
    Ok(out)
}

fn push_field(out: &mut String, number: u32, value: &str) {
    out.push('[');
    out.push_str(&number.to_string());
    out.push(',');
    escape_into(value, out);
    out.push_str("];");
}

fn encode_record_into(
    out: &mut String,
    value: &Value,
    limits: &Limits,
    elide_name: bool,
) -> Result<(), EncodeError> {
    let name = if elide_name { "" } else { value.name() };
    if name.len() > limits.max_name_len {
        return Err(EncodeError::NameTooLong {
            len: name.len(),
            max: limits.max_name_len,
        });
    }

    out.push('[');
    escape_into(name, out);
    out.push(',');
    out.push_str(value.type_tag().wire_name());
    out.push(',');

    match value.payload() {
        Payload::Null => {}
        Payload::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        Payload::Short(v) => out.push_str(&v.to_string()),
        Payload::UShort(v) => out.push_str(&v.to_string()),
        Payload::Int(v) => out.push_str(&v.to_string()),
        Payload::UInt(v) => out.push_str(&v.to_string()),
        Payload::Long(v) => out.push_str(&v.to_string()),
        Payload::ULong(v) => out.push_str(&v.to_string()),
        Payload::LLong(v) => out.push_str(&v.to_string()),
        Payload::ULLong(v) => out.push_str(&v.to_string()),
        Payload::Float(v) => out.push_str(&v.to_string()),
        Payload::Double(v) => out.push_str(&v.to_string()),
        Payload::Str(s) => {
            check_payload_size(s.len(), limits)?;
            escape_into(s, out);
        }
        Payload::Bytes(b) => {
            check_payload_size(b.len(), limits)?;
            push_hex(out, b);
        }
        Payload::Container(c) => {
            out.push('@');
            escape_into(name, out);
            out.push_str("{{");
            for child in c {
                encode_record_into(out, child, limits, false)?;
            }
            out.push_str("}}");
        }
        Payload::Array(a) => {
            for element in a {
                encode_record_into(out, element, limits, true)?;
            }
        }
    }

    out.push_str("];");
    Ok(())
}

fn check_payload_size(len: usize, limits: &Limits) -> Result<(), EncodeError> {
    if len > limits.max_value_size {
        return Err(EncodeError::ValueTooLarge {
            len,
            max: limits.max_value_size,
        });
    }
    Ok(())
}

fn push_hex(out: &mut String, bytes: &[u8]) {
    const HEX: &[u8; 16] = b"0123456789abcdef";
    for b in bytes {
        out.push(HEX[(b >> 4) as usize] as char);
        out.push(HEX[(b & 0x0F) as usize] as char);
    }
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes one text message into its header and value sequence.
pub fn decode_message(
    text: &str,
    limits: &Limits,
) -> Result<(MessageHeader, Vec<Value>), DecodeError> {
    if text.len() > limits.max_buffer_size {
        return Err(DecodeError::BufferTooLarge {
            len: text.len(),
            max: limits.max_buffer_size,
        });
    }

    let mut sc = Scanner::new(text);
    if !sc.eat("@header") {
        return Err(DecodeError::MissingHeader);
    }
    sc.expect("{{", "header braces")?;
    let mut header = MessageHeader::default();
    while !sc.eat("}}") {
        if sc.is_empty() {
            return Err(DecodeError::MalformedRecord {
                context: "unterminated header section",
            });
        }
        decode_header_field(&mut sc, &mut header)?;
    }
    sc.expect(";", "header terminator")?;

    if !sc.eat("@data") {
        return Err(DecodeError::MissingData);
    }
    sc.expect("{{", "data braces")?;
    let mut values = Vec::new();
    while !sc.eat("}}") {
        if sc.is_empty() {
            return Err(DecodeError::MalformedRecord {
                context: "unterminated data section",
            });
        }
        values.push(decode_record_inner(&mut sc, 1, limits)?);
    }
    sc.expect(";", "data terminator")?;

    if !sc.is_empty() {
        return Err(DecodeError::MalformedRecord {
            context: "trailing characters after message",
        });
    }
    Ok((header, values))
}

/// Decodes one text record into a value.
pub fn decode_record(text: &str, limits: &Limits) -> Result<Value, DecodeError> {
    if text.len() > limits.max_buffer_size {
        return Err(DecodeError::BufferTooLarge {
            len: text.len(),
            max: limits.max_buffer_size,
        });
    }
    let mut sc = Scanner::new(text);
    let value = decode_record_inner(&mut sc, 1, limits)?;
    if !sc.is_empty() {
        return Err(DecodeError::MalformedRecord {
            context: "trailing characters after record",
        });
    }
    Ok(value)
}

fn decode_header_field(
    sc: &mut Scanner<'_>,
    header: &mut MessageHeader,
) -> Result<(), DecodeError> {
    sc.expect("[", "header field start")?;
    let number: u32 = sc.scan_field()?.parse().map_err(|_| DecodeError::BadNumber {
        field: "header field number",
    })?;
    let value = unescape(sc.scan_payload()?)?;
    match number {
        FIELD_TARGET_ID => header.target_id = value,
        FIELD_TARGET_SUB_ID => header.target_sub_id = value,
        FIELD_SOURCE_ID => header.source_id = value,
        FIELD_SOURCE_SUB_ID => header.source_sub_id = value,
        FIELD_MESSAGE_TYPE => header.message_type = value,
        FIELD_MESSAGE_VERSION => header.message_version = value,
        _ => return Err(DecodeError::UnknownHeaderField { field: number }),
    }
    Ok(())
}

/// Decodes one record from the scanner. `depth` counts composite ancestors
/// including the record itself, starting at 1 for a root record, mirroring
/// the binary codec's depth accounting.
fn decode_record_inner(
    sc: &mut Scanner<'_>,
    depth: usize,
    limits: &Limits,
) -> Result<Value, DecodeError> {
    sc.expect("[", "record start")?;
    let name = unescape(sc.scan_field()?)?;
    if name.len() > limits.max_name_len {
        return Err(DecodeError::NameTooLong {
            len: name.len(),
            max: limits.max_name_len,
        });
    }

    let type_name = sc.scan_field()?;
    let tag = TypeTag::from_wire_name(type_name).ok_or_else(|| DecodeError::UnknownTypeName {
        name: type_name.to_string(),
    })?;
    if tag.is_composite() && depth >= limits.max_nesting_depth {
        return Err(DecodeError::NestingTooDeep {
            depth,
            max: limits.max_nesting_depth,
        });
    }

    let raw_payload = sc.scan_payload()?;
    decode_payload(name, tag, raw_payload, depth, limits)
}

fn decode_payload(
    name: String,
    tag: TypeTag,
    raw: &str,
    depth: usize,
    limits: &Limits,
) -> Result<Value, DecodeError> {
    match tag {
        TypeTag::Null => {
            if !raw.is_empty() {
                return Err(DecodeError::MalformedRecord {
                    context: "null payload must be empty",
                });
            }
            Ok(Value::null(name))
        }
        TypeTag::Bool => match raw {
            "true" => Ok(Value::bool(name, true)),
            "false" => Ok(Value::bool(name, false)),
            _ => Err(DecodeError::MalformedRecord {
                context: "bool payload must be true or false",
            }),
        },
        TypeTag::Short => Ok(Value::short(name, parse_i64(raw, tag)?)?),
        TypeTag::UShort => Ok(Value::ushort(name, parse_i64(raw, tag)?)?),
        TypeTag::Int => Ok(Value::int(name, parse_i64(raw, tag)?)?),
        TypeTag::UInt => Ok(Value::uint(name, parse_i64(raw, tag)?)?),
        TypeTag::Long => Ok(Value::long(name, parse_i64(raw, tag)?)?),
        TypeTag::ULong => Ok(Value::ulong(name, parse_i64(raw, tag)?)?),
        TypeTag::LLong => Ok(Value::llong(name, parse_i64(raw, tag)?)),
        TypeTag::ULLong => {
            let v: u64 = raw.parse().map_err(|_| DecodeError::BadNumber {
                field: tag.wire_name(),
            })?;
            Ok(Value::ullong(name, v))
        }
        TypeTag::Float => {
            let v: f32 = raw.parse().map_err(|_| DecodeError::BadNumber {
                field: tag.wire_name(),
            })?;
            Ok(Value::float(name, v))
        }
        TypeTag::Double => {
            let v: f64 = raw.parse().map_err(|_| DecodeError::BadNumber {
                field: tag.wire_name(),
            })?;
            Ok(Value::double(name, v))
        }
        TypeTag::String => {
            let s = unescape(raw)?;
            if s.len() > limits.max_value_size {
                return Err(DecodeError::ValueTooLarge {
                    len: s.len(),
                    max: limits.max_value_size,
                });
            }
            Ok(Value::string(name, s))
        }
        TypeTag::Bytes => {
            let b = parse_hex(raw)?;
            if b.len() > limits.max_value_size {
                return Err(DecodeError::ValueTooLarge {
                    len: b.len(),
                    max: limits.max_value_size,
                });
            }
            Ok(Value::bytes(name, b))
        }
        TypeTag::Container => decode_container_payload(name, raw, depth, limits),
        TypeTag::Array => {
            let mut sub = Scanner::new(raw);
            let mut array = Array::new();
            while !sub.is_empty() {
                array.push(decode_record_inner(&mut sub, depth + 1, limits)?);
            }
            Ok(Value::array(name, array))
        }
    }
}

fn decode_container_payload(
    name: String,
    raw: &str,
    depth: usize,
    limits: &Limits,
) -> Result<Value, DecodeError> {
    let mut sub = Scanner::new(raw);
    if !sub.eat("@") {
        return Err(DecodeError::MalformedContainer {
            context: "missing '@name{{...}}' wrapper",
        });
    }
    let wrapper_name = unescape(sub.scan_until_brace()?)?;
    if wrapper_name != name {
        return Err(DecodeError::MalformedContainer {
            context: "wrapper name does not match record name",
        });
    }
    if !sub.eat("{{") {
        return Err(DecodeError::MalformedContainer {
            context: "missing container braces",
        });
    }

    let mut container = Container::new();
    while !sub.eat("}}") {
        if sub.is_empty() {
            return Err(DecodeError::MalformedContainer {
                context: "unterminated container braces",
            });
        }
        container.add(decode_record_inner(&mut sub, depth + 1, limits)?);
    }
    if !sub.is_empty() {
        return Err(DecodeError::MalformedContainer {
            context: "trailing characters after container braces",
        });
    }
    Ok(Value::container(name, container))
}

fn parse_i64(raw: &str, tag: TypeTag) -> Result<i64, DecodeError> {
    raw.parse().map_err(|_| DecodeError::BadNumber {
        field: tag.wire_name(),
    })
}

fn parse_hex(s: &str) -> Result<Vec<u8>, DecodeError> {
    if s.len() % 2 != 0 {
        return Err(DecodeError::BadHexDigit);
    }
    let mut out = Vec::with_capacity(s.len() / 2);
    for pair in s.as_bytes().chunks_exact(2) {
        let hi = hex_val(pair[0]).ok_or(DecodeError::BadHexDigit)?;
        let lo = hex_val(pair[1]).ok_or(DecodeError::BadHexDigit)?;
        out.push((hi << 4) | lo);
    }
    Ok(out)
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}
