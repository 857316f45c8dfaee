//! The closed registry of type tags and their canonical wire IDs.

use std::fmt;

/// One-byte discriminator identifying a value's variant on the wire.
///
/// The numeric IDs and the lowercase text-grammar names are both part of the
/// cross-language contract and must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    Null = 0,
    Bool = 1,
    Short = 2,
    UShort = 3,
    Int = 4,
    UInt = 5,
    /// 32-bit signed despite the name; see the module docs on `model::value`.
    Long = 6,
    /// 32-bit unsigned despite the name.
    ULong = 7,
    LLong = 8,
    ULLong = 9,
    Float = 10,
    Double = 11,
    String = 12,
    Bytes = 13,
    Container = 14,
    Array = 15,
}

impl TypeTag {
    /// Creates a TypeTag from its wire representation.
    pub fn from_u8(v: u8) -> Option<TypeTag> {
        match v {
            0 => Some(TypeTag::Null),
            1 => Some(TypeTag::Bool),
            2 => Some(TypeTag::Short),
            3 => Some(TypeTag::UShort),
            4 => Some(TypeTag::Int),
            5 => Some(TypeTag::UInt),
            6 => Some(TypeTag::Long),
            7 => Some(TypeTag::ULong),
            8 => Some(TypeTag::LLong),
            9 => Some(TypeTag::ULLong),
            10 => Some(TypeTag::Float),
            11 => Some(TypeTag::Double),
            12 => Some(TypeTag::String),
            13 => Some(TypeTag::Bytes),
            14 => Some(TypeTag::Container),
            15 => Some(TypeTag::Array),
            _ => None,
        }
    }

    /// Returns the lowercase identifier used by the text grammar.
    pub fn wire_name(self) -> &'static str {
        match self {
            TypeTag::Null => "null_value",
            TypeTag::Bool => "bool_value",
            TypeTag::Short => "short_value",
            TypeTag::UShort => "ushort_value",
            TypeTag::Int => "int_value",
            TypeTag::UInt => "uint_value",
            TypeTag::Long => "long_value",
            TypeTag::ULong => "ulong_value",
            TypeTag::LLong => "llong_value",
            TypeTag::ULLong => "ullong_value",
            TypeTag::Float => "float_value",
            TypeTag::Double => "double_value",
            TypeTag::String => "string_value",
            TypeTag::Bytes => "bytes_value",
            TypeTag::Container => "container_value",
            TypeTag::Array => "array_value",
        }
    }

    /// Creates a TypeTag from its text-grammar identifier.
    pub fn from_wire_name(name: &str) -> Option<TypeTag> {
        match name {
            "null_value" => Some(TypeTag::Null),
            "bool_value" => Some(TypeTag::Bool),
            "short_value" => Some(TypeTag::Short),
            "ushort_value" => Some(TypeTag::UShort),
            "int_value" => Some(TypeTag::Int),
            "uint_value" => Some(TypeTag::UInt),
            "long_value" => Some(TypeTag::Long),
            "ulong_value" => Some(TypeTag::ULong),
            "llong_value" => Some(TypeTag::LLong),
            "ullong_value" => Some(TypeTag::ULLong),
            "float_value" => Some(TypeTag::Float),
            "double_value" => Some(TypeTag::Double),
            "string_value" => Some(TypeTag::String),
            "bytes_value" => Some(TypeTag::Bytes),
            "container_value" => Some(TypeTag::Container),
            "array_value" => Some(TypeTag::Array),
            _ => None,
        }
    }

    /// Returns true for the two composite tags.
    pub fn is_composite(self) -> bool {
        matches!(self, TypeTag::Container | TypeTag::Array)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TypeTag; 16] = [
        TypeTag::Null,
        TypeTag::Bool,
        TypeTag::Short,
        TypeTag::UShort,
        TypeTag::Int,
        TypeTag::UInt,
        TypeTag::Long,
        TypeTag::ULong,
        TypeTag::LLong,
        TypeTag::ULLong,
        TypeTag::Float,
        TypeTag::Double,
        TypeTag::String,
        TypeTag::Bytes,
        TypeTag::Container,
        TypeTag::Array,
    ];

    #[test]
    fn test_wire_id_roundtrip() {
        for tag in ALL {
            assert_eq!(TypeTag::from_u8(tag as u8), Some(tag));
        }
        assert_eq!(TypeTag::from_u8(16), None);
        assert_eq!(TypeTag::from_u8(255), None);
    }

    #[test]
    fn test_canonical_ids() {
        assert_eq!(TypeTag::Null as u8, 0);
        assert_eq!(TypeTag::Bool as u8, 1);
        assert_eq!(TypeTag::LLong as u8, 8);
        assert_eq!(TypeTag::String as u8, 12);
        assert_eq!(TypeTag::Container as u8, 14);
        assert_eq!(TypeTag::Array as u8, 15);
    }

    #[test]
    fn test_wire_name_roundtrip() {
        for tag in ALL {
            assert_eq!(TypeTag::from_wire_name(tag.wire_name()), Some(tag));
        }
        assert_eq!(TypeTag::from_wire_name("decimal_value"), None);
        assert_eq!(TypeTag::from_wire_name("BOOL_VALUE"), None);
        assert_eq!(TypeTag::from_wire_name(""), None);
    }

    #[test]
    fn test_is_composite() {
        assert!(TypeTag::Container.is_composite());
        assert!(TypeTag::Array.is_composite());
        assert!(!TypeTag::Bytes.is_composite());
        assert!(!TypeTag::Null.is_composite());
    }
}
