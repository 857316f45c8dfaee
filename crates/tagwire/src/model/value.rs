//! The sixteen typed value variants.
//!
//! A [`Value`] pairs an immutable name with one of sixteen payload kinds.
//! The numeric variants split into three families:
//!
//! - Bounded (Short, UShort, Int, UInt, Long, ULong): construction takes an
//!   `i64`, validates the closed wire range, and returns a [`ValueError`]
//!   carrying the offending value when it does not fit. Long and ULong are
//!   deliberately restricted to 32 bits despite their names so that all
//!   platforms agree on the wire width; 64-bit magnitudes use LLong/ULLong.
//! - Wide (LLong, ULLong): full 64-bit signed/unsigned, stored losslessly.
//!   With exact-width parameters a range violation is unrepresentable, so
//!   these constructors are infallible.
//! - IEEE-754 (Float, Double): no restriction beyond the format.

use std::fmt;

use crate::error::ValueError;
use crate::limits::{Limits, RECORD_HEADER_LEN};
use crate::model::container::{Array, Container};
use crate::model::tag::TypeTag;

/// A named, type-tagged value: one node of a wire-encodable tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    name: String,
    payload: Payload,
}

/// The sixteen payload kinds, mirroring the tag registry one-to-one.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Null,
    Bool(bool),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    /// 32-bit signed by design; see the module docs.
    Long(i32),
    /// 32-bit unsigned by design; see the module docs.
    ULong(u32),
    LLong(i64),
    ULLong(u64),
    Float(f32),
    Double(f64),
    Str(String),
    Bytes(Vec<u8>),
    Container(Container),
    Array(Array),
}

fn check_range(tag: TypeTag, value: i64, min: i64, max: i64) -> Result<i64, ValueError> {
    if value < min || value > max {
        return Err(ValueError::OutOfRange {
            tag,
            value,
            min,
            max,
        });
    }
    Ok(value)
}

impl Value {
    /// Creates a value directly from a payload.
    pub fn new(name: impl Into<String>, payload: Payload) -> Self {
        Self {
            name: name.into(),
            payload,
        }
    }

    /// Creates a Null value (empty payload).
    pub fn null(name: impl Into<String>) -> Self {
        Self::new(name, Payload::Null)
    }

    /// Creates a Bool value.
    pub fn bool(name: impl Into<String>, value: bool) -> Self {
        Self::new(name, Payload::Bool(value))
    }

    /// Creates a Short value; the input must fit a signed 16-bit integer.
    pub fn short(name: impl Into<String>, value: i64) -> Result<Self, ValueError> {
        let v = check_range(TypeTag::Short, value, i16::MIN as i64, i16::MAX as i64)?;
        Ok(Self::new(name, Payload::Short(v as i16)))
    }

    /// Creates a UShort value; the input must fit an unsigned 16-bit integer.
    pub fn ushort(name: impl Into<String>, value: i64) -> Result<Self, ValueError> {
        let v = check_range(TypeTag::UShort, value, 0, u16::MAX as i64)?;
        Ok(Self::new(name, Payload::UShort(v as u16)))
    }

    /// Creates an Int value; the input must fit a signed 32-bit integer.
    pub fn int(name: impl Into<String>, value: i64) -> Result<Self, ValueError> {
        let v = check_range(TypeTag::Int, value, i32::MIN as i64, i32::MAX as i64)?;
        Ok(Self::new(name, Payload::Int(v as i32)))
    }

    /// Creates a UInt value; the input must fit an unsigned 32-bit integer.
    pub fn uint(name: impl Into<String>, value: i64) -> Result<Self, ValueError> {
        let v = check_range(TypeTag::UInt, value, 0, u32::MAX as i64)?;
        Ok(Self::new(name, Payload::UInt(v as u32)))
    }

    /// Creates a Long value.
    ///
    /// The allowed range is the signed 32-bit domain, not 64-bit; use
    /// [`Value::llong`] for wider magnitudes.
    pub fn long(name: impl Into<String>, value: i64) -> Result<Self, ValueError> {
        let v = check_range(TypeTag::Long, value, i32::MIN as i64, i32::MAX as i64)?;
        Ok(Self::new(name, Payload::Long(v as i32)))
    }

    /// Creates a ULong value.
    ///
    /// The allowed range is the unsigned 32-bit domain, not 64-bit; use
    /// [`Value::ullong`] for wider magnitudes.
    pub fn ulong(name: impl Into<String>, value: i64) -> Result<Self, ValueError> {
        let v = check_range(TypeTag::ULong, value, 0, u32::MAX as i64)?;
        Ok(Self::new(name, Payload::ULong(v as u32)))
    }

    /// Creates an LLong value holding the full signed 64-bit range.
    pub fn llong(name: impl Into<String>, value: i64) -> Self {
        Self::new(name, Payload::LLong(value))
    }

    /// Creates a ULLong value holding the full unsigned 64-bit range.
    pub fn ullong(name: impl Into<String>, value: u64) -> Self {
        Self::new(name, Payload::ULLong(value))
    }

    /// Creates a Float value (IEEE-754 single precision).
    pub fn float(name: impl Into<String>, value: f32) -> Self {
        Self::new(name, Payload::Float(value))
    }

    /// Creates a Double value (IEEE-754 double precision).
    pub fn double(name: impl Into<String>, value: f64) -> Self {
        Self::new(name, Payload::Double(value))
    }

    /// Creates a String value. Payload size is the UTF-8 byte length.
    pub fn string(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, Payload::Str(value.into()))
    }

    /// Creates a Bytes value holding an opaque byte sequence.
    pub fn bytes(name: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self::new(name, Payload::Bytes(value.into()))
    }

    /// Creates a Container value.
    pub fn container(name: impl Into<String>, container: Container) -> Self {
        Self::new(name, Payload::Container(container))
    }

    /// Creates an Array value.
    pub fn array(name: impl Into<String>, array: Array) -> Self {
        Self::new(name, Payload::Array(array))
    }

    /// Returns the value's name, fixed at construction.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value's payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Returns the wire type tag for this value.
    pub fn type_tag(&self) -> TypeTag {
        match &self.payload {
            Payload::Null => TypeTag::Null,
            Payload::Bool(_) => TypeTag::Bool,
            Payload::Short(_) => TypeTag::Short,
            Payload::UShort(_) => TypeTag::UShort,
            Payload::Int(_) => TypeTag::Int,
            Payload::UInt(_) => TypeTag::UInt,
            Payload::Long(_) => TypeTag::Long,
            Payload::ULong(_) => TypeTag::ULong,
            Payload::LLong(_) => TypeTag::LLong,
            Payload::ULLong(_) => TypeTag::ULLong,
            Payload::Float(_) => TypeTag::Float,
            Payload::Double(_) => TypeTag::Double,
            Payload::Str(_) => TypeTag::String,
            Payload::Bytes(_) => TypeTag::Bytes,
            Payload::Container(_) => TypeTag::Container,
            Payload::Array(_) => TypeTag::Array,
        }
    }

    /// Returns the exact byte length of this value's binary payload.
    ///
    /// For composites this is the total length of the concatenated child
    /// records, computed recursively.
    pub fn payload_len(&self) -> usize {
        match &self.payload {
            Payload::Null => 0,
            Payload::Bool(_) => 1,
            Payload::Short(_) | Payload::UShort(_) => 2,
            Payload::Int(_)
            | Payload::UInt(_)
            | Payload::Long(_)
            | Payload::ULong(_)
            | Payload::Float(_) => 4,
            Payload::LLong(_) | Payload::ULLong(_) | Payload::Double(_) => 8,
            Payload::Str(s) => s.len(),
            Payload::Bytes(b) => b.len(),
            Payload::Container(c) => c.iter().map(Value::record_len).sum(),
            Payload::Array(a) => a.iter().map(Value::record_len).sum(),
        }
    }

    /// Returns the exact byte length of this value's full binary record
    /// (header + name + payload).
    pub fn record_len(&self) -> usize {
        RECORD_HEADER_LEN + self.name.len() + self.payload_len()
    }

    /// Encodes this value as a full binary record.
    ///
    /// Convenience for [`crate::codec::encode_value`]; external persistence
    /// layers wrap the returned bytes in their own envelope.
    pub fn serialize(&self, limits: &Limits) -> Result<Vec<u8>, crate::error::EncodeError> {
        crate::codec::encode_value(self, limits)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self.payload {
            Payload::Short(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u16(&self) -> Option<u16> {
        match self.payload {
            Payload::UShort(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self.payload {
            Payload::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u32(&self) -> Option<u32> {
        match self.payload {
            Payload::UInt(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the native value of a Long (32-bit signed on the wire).
    pub fn as_long(&self) -> Option<i32> {
        match self.payload {
            Payload::Long(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the native value of a ULong (32-bit unsigned on the wire).
    pub fn as_ulong(&self) -> Option<u32> {
        match self.payload {
            Payload::ULong(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self.payload {
            Payload::LLong(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        match self.payload {
            Payload::ULLong(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self.payload {
            Payload::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.payload {
            Payload::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            Payload::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_container(&self) -> Option<&Container> {
        match &self.payload {
            Payload::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_container_mut(&mut self) -> Option<&mut Container> {
        match &mut self.payload {
            Payload::Container(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match &self.payload {
            Payload::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match &mut self.payload {
            Payload::Array(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.payload {
            Payload::Null => write!(f, "{}: null", self.name),
            Payload::Bool(v) => write!(f, "{}: {}", self.name, v),
            Payload::Short(v) => write!(f, "{}: {}", self.name, v),
            Payload::UShort(v) => write!(f, "{}: {}", self.name, v),
            Payload::Int(v) => write!(f, "{}: {}", self.name, v),
            Payload::UInt(v) => write!(f, "{}: {}", self.name, v),
            Payload::Long(v) => write!(f, "{}: {}", self.name, v),
            Payload::ULong(v) => write!(f, "{}: {}", self.name, v),
            Payload::LLong(v) => write!(f, "{}: {}", self.name, v),
            Payload::ULLong(v) => write!(f, "{}: {}", self.name, v),
            Payload::Float(v) => write!(f, "{}: {}", self.name, v),
            Payload::Double(v) => write!(f, "{}: {}", self.name, v),
            Payload::Str(s) => write!(f, "{}: {:?}", self.name, s),
            Payload::Bytes(b) => write!(f, "{}: {} bytes", self.name, b.len()),
            Payload::Container(c) => write!(f, "{}: container[{}]", self.name, c.len()),
            Payload::Array(a) => write!(f, "{}: array[{}]", self.name, a.len()),
        }
    }
}
