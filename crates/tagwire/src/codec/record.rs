//! Recursive encode/decode between a value tree and the binary record format.
//!
//! Record layout, all integers little-endian:
//!
//! ```text
//! record := type_tag:1B  name_len:4B  name:UTF8[name_len]
//!           payload_size:4B  payload:bytes[payload_size]
//! ```
//!
//! Composite payloads are the concatenation of the child records in
//! insertion order. Decoding is all-or-nothing: every limit violation,
//! truncation, or malformed field aborts the whole decode.

use crate::codec::primitives::{Reader, Writer};
use crate::error::{DecodeError, EncodeError};
use crate::limits::{Limits, RECORD_HEADER_LEN};
use crate::model::{Array, Container, Payload, TypeTag, Value};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes a value as a full binary record.
pub fn encode_value(value: &Value, limits: &Limits) -> Result<Vec<u8>, EncodeError> {
    let total = value.record_len();
    if total > limits.max_buffer_size {
        return Err(EncodeError::BufferTooLarge {
            len: total,
            max: limits.max_buffer_size,
        });
    }
    let mut writer = Writer::with_capacity(total);
    encode_record(&mut writer, value, limits)?;
    Ok(writer.into_bytes())
}

fn encode_record(writer: &mut Writer, value: &Value, limits: &Limits) -> Result<(), EncodeError> {
    let name = value.name();
    if name.len() > limits.max_name_len {
        return Err(EncodeError::NameTooLong {
            len: name.len(),
            max: limits.max_name_len,
        });
    }
    let payload_len = value.payload_len();
    if payload_len > limits.max_value_size {
        return Err(EncodeError::ValueTooLarge {
            len: payload_len,
            max: limits.max_value_size,
        });
    }

    writer.write_byte(value.type_tag() as u8);
    writer.write_u32(name.len() as u32);
    writer.write_bytes(name.as_bytes());
    writer.write_u32(payload_len as u32);

    match value.payload() {
        Payload::Null => {}
        Payload::Bool(v) => writer.write_byte(if *v { 0x01 } else { 0x00 }),
        Payload::Short(v) => writer.write_i16(*v),
        Payload::UShort(v) => writer.write_u16(*v),
        Payload::Int(v) => writer.write_i32(*v),
        Payload::UInt(v) => writer.write_u32(*v),
        Payload::Long(v) => writer.write_i32(*v),
        Payload::ULong(v) => writer.write_u32(*v),
        Payload::LLong(v) => writer.write_i64(*v),
        Payload::ULLong(v) => writer.write_u64(*v),
        Payload::Float(v) => writer.write_f32(*v),
        Payload::Double(v) => writer.write_f64(*v),
        Payload::Str(s) => writer.write_bytes(s.as_bytes()),
        Payload::Bytes(b) => writer.write_bytes(b),
        Payload::Container(c) => {
            for child in c {
                encode_record(writer, child, limits)?;
            }
        }
        Payload::Array(a) => {
            for element in a {
                encode_record(writer, element, limits)?;
            }
        }
    }
    Ok(())
}

// =============================================================================
// DECODING
// =============================================================================

/// Decodes a value tree from a buffer holding exactly one record.
///
/// Rejects buffers larger than `max_buffer_size` and trailing bytes after
/// the root record.
pub fn decode_value(buf: &[u8], limits: &Limits) -> Result<Value, DecodeError> {
    let (value, consumed) = decode_value_at(buf, 0, limits)?;
    if consumed != buf.len() {
        return Err(DecodeError::TrailingBytes {
            remaining: buf.len() - consumed,
        });
    }
    Ok(value)
}

/// Decodes one record starting at `offset`, returning the value and the
/// number of bytes consumed.
///
/// This is the surface used by external envelope formats that embed records
/// back to back inside their own framing.
pub fn decode_value_at(
    buf: &[u8],
    offset: usize,
    limits: &Limits,
) -> Result<(Value, usize), DecodeError> {
    decode_at_expecting(buf, offset, limits, None)
}

/// Decodes a buffer holding exactly one Container record.
///
/// Fails with a type-tag mismatch before any further parsing when the root
/// record is not a Container.
pub fn decode_container(buf: &[u8], limits: &Limits) -> Result<Value, DecodeError> {
    decode_root_expecting(buf, limits, TypeTag::Container)
}

/// Decodes a buffer holding exactly one Array record.
pub fn decode_array(buf: &[u8], limits: &Limits) -> Result<Value, DecodeError> {
    decode_root_expecting(buf, limits, TypeTag::Array)
}

fn decode_root_expecting(
    buf: &[u8],
    limits: &Limits,
    expected: TypeTag,
) -> Result<Value, DecodeError> {
    let (value, consumed) = decode_at_expecting(buf, 0, limits, Some(expected))?;
    if consumed != buf.len() {
        return Err(DecodeError::TrailingBytes {
            remaining: buf.len() - consumed,
        });
    }
    Ok(value)
}

fn decode_at_expecting(
    buf: &[u8],
    offset: usize,
    limits: &Limits,
    expected: Option<TypeTag>,
) -> Result<(Value, usize), DecodeError> {
    if buf.len() > limits.max_buffer_size {
        return Err(DecodeError::BufferTooLarge {
            len: buf.len(),
            max: limits.max_buffer_size,
        });
    }
    if offset > buf.len() {
        return Err(DecodeError::BufferTooShort {
            context: "record offset",
        });
    }
    let mut reader = Reader::new(&buf[offset..]);
    let value = decode_record(&mut reader, 1, limits, expected)?;
    Ok((value, reader.position()))
}

/// Decodes one record from the reader. `depth` counts composite ancestors
/// including the record itself, starting at 1 for the root.
fn decode_record(
    reader: &mut Reader<'_>,
    depth: usize,
    limits: &Limits,
    expected: Option<TypeTag>,
) -> Result<Value, DecodeError> {
    if reader.remaining_len() < RECORD_HEADER_LEN {
        return Err(DecodeError::BufferTooShort {
            context: "record header",
        });
    }

    let tag_byte = reader.read_byte("type tag")?;
    let tag = TypeTag::from_u8(tag_byte).ok_or(DecodeError::UnknownTypeTag { tag: tag_byte })?;
    if let Some(exp) = expected {
        if tag != exp {
            return Err(DecodeError::TypeTagMismatch {
                expected: exp,
                found: tag,
            });
        }
    }
    if tag.is_composite() && depth >= limits.max_nesting_depth {
        return Err(DecodeError::NestingTooDeep {
            depth,
            max: limits.max_nesting_depth,
        });
    }

    // Name length is validated against the limit before any name bytes are
    // read, so an adversarial length field never drives an allocation.
    let name_len = reader.read_u32("name length")? as usize;
    if name_len > limits.max_name_len {
        return Err(DecodeError::NameTooLong {
            len: name_len,
            max: limits.max_name_len,
        });
    }
    if name_len + 4 > reader.remaining_len() {
        return Err(DecodeError::BufferUnderflow {
            context: "name",
            needed: name_len + 4,
            available: reader.remaining_len(),
        });
    }
    let name = reader.read_str(name_len, "name")?.to_string();

    let payload_size = reader.read_u32("payload size")? as usize;
    if payload_size > limits.max_value_size {
        return Err(DecodeError::ValueTooLarge {
            len: payload_size,
            max: limits.max_value_size,
        });
    }
    if payload_size > reader.remaining_len() {
        return Err(DecodeError::BufferUnderflow {
            context: "payload",
            needed: payload_size,
            available: reader.remaining_len(),
        });
    }

    let payload = decode_payload(reader, tag, payload_size, depth, limits)?;
    Ok(Value::new(name, payload))
}

fn decode_payload(
    reader: &mut Reader<'_>,
    tag: TypeTag,
    payload_size: usize,
    depth: usize,
    limits: &Limits,
) -> Result<Payload, DecodeError> {
    match tag {
        TypeTag::Null => {
            expect_size(tag, payload_size, 0)?;
            Ok(Payload::Null)
        }
        TypeTag::Bool => {
            expect_size(tag, payload_size, 1)?;
            match reader.read_byte("bool payload")? {
                0x00 => Ok(Payload::Bool(false)),
                0x01 => Ok(Payload::Bool(true)),
                value => Err(DecodeError::InvalidBool { value }),
            }
        }
        TypeTag::Short => {
            expect_size(tag, payload_size, 2)?;
            Ok(Payload::Short(reader.read_i16("short payload")?))
        }
        TypeTag::UShort => {
            expect_size(tag, payload_size, 2)?;
            Ok(Payload::UShort(reader.read_u16("ushort payload")?))
        }
        TypeTag::Int => {
            expect_size(tag, payload_size, 4)?;
            Ok(Payload::Int(reader.read_i32("int payload")?))
        }
        TypeTag::UInt => {
            expect_size(tag, payload_size, 4)?;
            Ok(Payload::UInt(reader.read_u32("uint payload")?))
        }
        TypeTag::Long => {
            expect_size(tag, payload_size, 4)?;
            Ok(Payload::Long(reader.read_i32("long payload")?))
        }
        TypeTag::ULong => {
            expect_size(tag, payload_size, 4)?;
            Ok(Payload::ULong(reader.read_u32("ulong payload")?))
        }
        TypeTag::LLong => {
            expect_size(tag, payload_size, 8)?;
            Ok(Payload::LLong(reader.read_i64("llong payload")?))
        }
        TypeTag::ULLong => {
            expect_size(tag, payload_size, 8)?;
            Ok(Payload::ULLong(reader.read_u64("ullong payload")?))
        }
        TypeTag::Float => {
            expect_size(tag, payload_size, 4)?;
            Ok(Payload::Float(reader.read_f32("float payload")?))
        }
        TypeTag::Double => {
            expect_size(tag, payload_size, 8)?;
            Ok(Payload::Double(reader.read_f64("double payload")?))
        }
        TypeTag::String => {
            let s = reader.read_str(payload_size, "string payload")?;
            Ok(Payload::Str(s.to_string()))
        }
        TypeTag::Bytes => {
            let b = reader.read_bytes(payload_size, "bytes payload")?;
            Ok(Payload::Bytes(b.to_vec()))
        }
        TypeTag::Container => {
            let mut container = Container::new();
            decode_children(reader, payload_size, depth, limits, |child| {
                container.add(child);
            })?;
            Ok(Payload::Container(container))
        }
        TypeTag::Array => {
            let mut array = Array::new();
            decode_children(reader, payload_size, depth, limits, |child| {
                array.push(child);
            })?;
            Ok(Payload::Array(array))
        }
    }
}

/// Decodes child records from a composite payload region until the region is
/// exactly consumed.
///
/// Each child must consume at least `min_bytes_read` bytes; a child that
/// reports less would let a malformed buffer spin this loop forever, so the
/// decode aborts immediately instead.
fn decode_children(
    reader: &mut Reader<'_>,
    payload_size: usize,
    depth: usize,
    limits: &Limits,
    mut sink: impl FnMut(Value),
) -> Result<(), DecodeError> {
    let region = reader.read_bytes(payload_size, "composite payload")?;
    let mut sub = Reader::new(region);
    while !sub.is_empty() {
        let before = sub.position();
        let child = decode_record(&mut sub, depth + 1, limits, None)?;
        let consumed = sub.position() - before;
        if consumed < limits.min_bytes_read {
            return Err(DecodeError::ZeroProgress {
                consumed,
                min: limits.min_bytes_read,
            });
        }
        sink(child);
    }
    Ok(())
}

fn expect_size(tag: TypeTag, declared: usize, expected: usize) -> Result<(), DecodeError> {
    if declared != expected {
        return Err(DecodeError::PayloadSizeMismatch {
            tag,
            declared,
            expected,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roundtrip(value: &Value) -> Value {
        let limits = Limits::default();
        let bytes = encode_value(value, &limits).unwrap();
        decode_value(&bytes, &limits).unwrap()
    }

    #[test]
    fn test_scalar_roundtrips_at_boundaries() {
        let cases = [
            Value::null("n"),
            Value::bool("b", true),
            Value::bool("b", false),
            Value::short("s", i16::MIN as i64).unwrap(),
            Value::short("s", i16::MAX as i64).unwrap(),
            Value::ushort("us", u16::MAX as i64).unwrap(),
            Value::int("i", i32::MIN as i64).unwrap(),
            Value::int("i", i32::MAX as i64).unwrap(),
            Value::uint("ui", 0).unwrap(),
            Value::uint("ui", u32::MAX as i64).unwrap(),
            Value::long("l", i32::MIN as i64).unwrap(),
            Value::long("l", i32::MAX as i64).unwrap(),
            Value::ulong("ul", u32::MAX as i64).unwrap(),
            Value::llong("ll", i64::MIN),
            Value::llong("ll", i64::MAX),
            Value::ullong("ull", 0),
            Value::ullong("ull", u64::MAX),
            Value::float("f", f32::MIN_POSITIVE),
            Value::float("f", -1.25),
            Value::double("d", f64::MAX),
            Value::string("str", "héllo wörld"),
            Value::string("str", ""),
            Value::bytes("raw", vec![0u8, 255, 128]),
            Value::bytes("raw", Vec::new()),
        ];
        for value in cases {
            let decoded = roundtrip(&value);
            assert_eq!(value, decoded, "round-trip failed for {value}");
        }
    }

    #[test]
    fn test_container_roundtrip() {
        // Scenario: a root container with three mixed-type members.
        let mut root = Container::new();
        root.add(Value::bool("flag", true));
        root.add(Value::int("count", 42).unwrap());
        root.add(Value::string("name", "test"));
        let value = Value::container("root", root);

        let decoded = roundtrip(&value);
        let c = decoded.as_container().unwrap();
        assert_eq!(decoded.name(), "root");
        assert_eq!(c.len(), 3);
        assert_eq!(c.get("flag").unwrap().as_bool(), Some(true));
        assert_eq!(c.get("count").unwrap().as_i32(), Some(42));
        assert_eq!(c.get("name").unwrap().as_str(), Some("test"));
        // Insertion order survives the wire.
        let names: Vec<&str> = c.iter().map(Value::name).collect();
        assert_eq!(names, ["flag", "count", "name"]);
    }

    #[test]
    fn test_heterogeneous_array_roundtrip() {
        let mut a = Array::new();
        a.push(Value::int("first", 1).unwrap());
        a.push(Value::string("second", "two"));
        a.push(Value::llong("third", -3));
        let value = Value::array("mixed", a);

        let decoded = roundtrip(&value);
        let a = decoded.as_array().unwrap();
        assert_eq!(a.len(), 3);
        assert_eq!(a[0].as_i32(), Some(1));
        assert_eq!(a[1].as_str(), Some("two"));
        assert_eq!(a[2].as_i64(), Some(-3));
        // Binary records keep element names.
        assert_eq!(a[0].name(), "first");
    }

    #[test]
    fn test_size_accounting() {
        let mut inner = Container::new();
        inner.add(Value::double("pi", 3.25));
        let mut root = Container::new();
        root.add(Value::string("s", "abc"));
        root.add(Value::container("inner", inner));
        let value = Value::container("root", root);

        let bytes = encode_value(&value, &Limits::default()).unwrap();
        assert_eq!(bytes.len(), value.record_len());

        // The declared payload size equals the exact length that follows it.
        let name_len = u32::from_le_bytes(bytes[1..5].try_into().unwrap()) as usize;
        assert_eq!(name_len, 4);
        let size_off = 5 + name_len;
        let payload_size =
            u32::from_le_bytes(bytes[size_off..size_off + 4].try_into().unwrap()) as usize;
        assert_eq!(payload_size, bytes.len() - size_off - 4);
        assert_eq!(payload_size, value.payload_len());
    }

    #[test]
    fn test_name_limit_checked_before_name_bytes() {
        let limits = Limits::default();
        // Header only: declared name length far beyond the limit, no name
        // bytes present at all. The limit check must fire, not a short read.
        let mut buf = Vec::new();
        buf.push(TypeTag::Null as u8);
        buf.extend_from_slice(&(limits.max_name_len as u32 + 1).to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());

        let err = decode_value(&buf, &limits).unwrap_err();
        assert!(matches!(err, DecodeError::NameTooLong { len, .. } if len == limits.max_name_len + 1));
    }

    #[test]
    fn test_payload_limit_checked_before_payload_bytes() {
        let limits = Limits::default();
        let mut buf = Vec::new();
        buf.push(TypeTag::Bytes as u8);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&(limits.max_value_size as u32 + 1).to_le_bytes());

        let err = decode_value(&buf, &limits).unwrap_err();
        assert!(matches!(err, DecodeError::ValueTooLarge { .. }));
    }

    #[test]
    fn test_declared_payload_past_buffer_end_underflows() {
        // Scenario: payload size says 100 bytes, buffer holds 4.
        let mut buf = Vec::new();
        buf.push(TypeTag::Bytes as u8);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&100u32.to_le_bytes());
        buf.extend_from_slice(&[1, 2, 3, 4]);

        let err = decode_value(&buf, &Limits::default()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::BufferUnderflow {
                context: "payload",
                needed: 100,
                available: 4,
            }
        ));
    }

    #[test]
    fn test_truncated_header() {
        let buf = [TypeTag::Int as u8, 0, 0];
        let err = decode_value(&buf, &Limits::default()).unwrap_err();
        assert!(matches!(err, DecodeError::BufferTooShort { .. }));
    }

    #[test]
    fn test_unknown_type_tag() {
        let mut buf = vec![0xEEu8];
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&0u32.to_le_bytes());
        let err = decode_value(&buf, &Limits::default()).unwrap_err();
        assert_eq!(err, DecodeError::UnknownTypeTag { tag: 0xEE });
    }

    #[test]
    fn test_trailing_bytes_rejected() {
        let mut bytes = encode_value(&Value::null("x"), &Limits::default()).unwrap();
        bytes.push(0);
        let err = decode_value(&bytes, &Limits::default()).unwrap_err();
        assert_eq!(err, DecodeError::TrailingBytes { remaining: 1 });
    }

    #[test]
    fn test_decode_value_at_reports_consumed() {
        let limits = Limits::default();
        let first = Value::int("a", 7).unwrap();
        let second = Value::string("b", "tail");
        let mut buf = encode_value(&first, &limits).unwrap();
        let first_len = buf.len();
        buf.extend_from_slice(&encode_value(&second, &limits).unwrap());

        let (v1, consumed) = decode_value_at(&buf, 0, &limits).unwrap();
        assert_eq!(v1, first);
        assert_eq!(consumed, first_len);
        let (v2, consumed2) = decode_value_at(&buf, first_len, &limits).unwrap();
        assert_eq!(v2, second);
        assert_eq!(first_len + consumed2, buf.len());
    }

    #[test]
    fn test_composite_tag_mismatch() {
        let limits = Limits::default();
        let bytes = encode_value(&Value::array("a", Array::new()), &limits).unwrap();
        let err = decode_container(&bytes, &limits).unwrap_err();
        assert_eq!(
            err,
            DecodeError::TypeTagMismatch {
                expected: TypeTag::Container,
                found: TypeTag::Array,
            }
        );
        assert!(decode_array(&bytes, &limits).is_ok());
    }

    #[test]
    fn test_fixed_width_payload_size_mismatch() {
        // A Bool record declaring 2 payload bytes is malformed even though
        // the buffer has the bytes.
        let mut buf = Vec::new();
        buf.push(TypeTag::Bool as u8);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&2u32.to_le_bytes());
        buf.extend_from_slice(&[1, 1]);

        let err = decode_value(&buf, &Limits::default()).unwrap_err();
        assert_eq!(
            err,
            DecodeError::PayloadSizeMismatch {
                tag: TypeTag::Bool,
                declared: 2,
                expected: 1,
            }
        );
    }

    #[test]
    fn test_invalid_bool_payload() {
        let mut buf = Vec::new();
        buf.push(TypeTag::Bool as u8);
        buf.extend_from_slice(&0u32.to_le_bytes());
        buf.extend_from_slice(&1u32.to_le_bytes());
        buf.push(7);

        let err = decode_value(&buf, &Limits::default()).unwrap_err();
        assert_eq!(err, DecodeError::InvalidBool { value: 7 });
    }

    fn nested_containers(levels: usize) -> Value {
        let mut value = Value::container("c", Container::new());
        for _ in 1..levels {
            let mut outer = Container::new();
            outer.add(value);
            value = Value::container("c", outer);
        }
        value
    }

    #[test]
    fn test_depth_enforcement() {
        let limits = Limits {
            max_nesting_depth: 8,
            ..Limits::default()
        };

        // Exactly max - 1 nested composites decode.
        let ok = encode_value(&nested_containers(7), &limits).unwrap();
        assert!(decode_value(&ok, &limits).is_ok());

        // One level deeper fails with a nesting-depth error.
        let too_deep = encode_value(&nested_containers(8), &limits).unwrap();
        let err = decode_value(&too_deep, &limits).unwrap_err();
        assert!(matches!(err, DecodeError::NestingTooDeep { depth: 8, max: 8 }));
    }

    #[test]
    fn test_zero_progress_guard() {
        // With a raised per-step minimum, a legitimate 9-byte child record
        // trips the guard, proving the loop cannot run on sub-minimum steps.
        let limits = Limits {
            min_bytes_read: 10,
            ..Limits::default()
        };
        let mut c = Container::new();
        c.add(Value::null(""));
        let bytes = encode_value(&Value::container("r", c), &Limits::default()).unwrap();

        let err = decode_value(&bytes, &limits).unwrap_err();
        assert_eq!(err, DecodeError::ZeroProgress { consumed: 9, min: 10 });
    }

    #[test]
    fn test_buffer_size_gate() {
        let limits = Limits {
            max_buffer_size: 16,
            ..Limits::default()
        };
        let bytes = encode_value(&Value::string("n", "0123456789"), &Limits::default()).unwrap();
        assert!(bytes.len() > 16);
        let err = decode_value(&bytes, &limits).unwrap_err();
        assert!(matches!(err, DecodeError::BufferTooLarge { .. }));
    }

    #[test]
    fn test_encode_respects_limits() {
        let limits = Limits {
            max_name_len: 4,
            ..Limits::default()
        };
        let err = encode_value(&Value::null("longname"), &limits).unwrap_err();
        assert!(matches!(err, EncodeError::NameTooLong { len: 8, max: 4 }));

        let limits = Limits {
            max_value_size: 2,
            ..Limits::default()
        };
        let err = encode_value(&Value::string("s", "abc"), &limits).unwrap_err();
        assert!(matches!(err, EncodeError::ValueTooLarge { len: 3, max: 2 }));
    }

    fn arb_scalar() -> impl Strategy<Value = Value> {
        let name = "[a-z]{0,6}";
        prop_oneof![
            name.prop_map(Value::null),
            (name, any::<bool>()).prop_map(|(n, v)| Value::bool(n, v)),
            (name, any::<i16>()).prop_map(|(n, v)| Value::short(n, v as i64).unwrap()),
            (name, any::<u16>()).prop_map(|(n, v)| Value::ushort(n, v as i64).unwrap()),
            (name, any::<i32>()).prop_map(|(n, v)| Value::int(n, v as i64).unwrap()),
            (name, any::<u32>()).prop_map(|(n, v)| Value::uint(n, v as i64).unwrap()),
            (name, any::<i32>()).prop_map(|(n, v)| Value::long(n, v as i64).unwrap()),
            (name, any::<u32>()).prop_map(|(n, v)| Value::ulong(n, v as i64).unwrap()),
            (name, any::<i64>()).prop_map(|(n, v)| Value::llong(n, v)),
            (name, any::<u64>()).prop_map(|(n, v)| Value::ullong(n, v)),
            (name, -1.0e6f32..1.0e6).prop_map(|(n, v)| Value::float(n, v)),
            (name, -1.0e12f64..1.0e12).prop_map(|(n, v)| Value::double(n, v)),
            (name, "[ -~]{0,12}").prop_map(|(n, v)| Value::string(n, v)),
            (name, proptest::collection::vec(any::<u8>(), 0..16))
                .prop_map(|(n, v)| Value::bytes(n, v)),
        ]
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        arb_scalar().prop_recursive(4, 24, 4, |inner| {
            let name = "[a-z]{0,6}";
            prop_oneof![
                (name, proptest::collection::vec(inner.clone(), 0..4)).prop_map(|(n, children)| {
                    let mut c = Container::new();
                    for child in children {
                        c.add(child);
                    }
                    Value::container(n, c)
                }),
                (name, proptest::collection::vec(inner, 0..4))
                    .prop_map(|(n, elements)| Value::array(n, elements.into_iter().collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn prop_roundtrip(value in arb_value()) {
            let limits = Limits::default();
            let bytes = encode_value(&value, &limits).unwrap();
            prop_assert_eq!(bytes.len(), value.record_len());
            let decoded = decode_value(&bytes, &limits).unwrap();
            prop_assert_eq!(decoded, value);
        }
    }
}
