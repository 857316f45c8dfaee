//! Simple decoder to inspect binary record files.

use std::fs;
use tagwire::{decode_value, Limits, Payload, Value};

fn format_scalar(v: &Value) -> String {
    match v.payload() {
        Payload::Null => "null".to_string(),
        Payload::Bool(b) => format!("{}", b),
        Payload::Short(n) => format!("{}", n),
        Payload::UShort(n) => format!("{}", n),
        Payload::Int(n) => format!("{}", n),
        Payload::UInt(n) => format!("{}", n),
        Payload::Long(n) => format!("{}", n),
        Payload::ULong(n) => format!("{}", n),
        Payload::LLong(n) => format!("{}", n),
        Payload::ULLong(n) => format!("{}", n),
        Payload::Float(f) => format!("{}", f),
        Payload::Double(f) => format!("{}", f),
        Payload::Str(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.len() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Payload::Bytes(b) => format!("BYTES[{}]", b.len()),
        Payload::Container(_) | Payload::Array(_) => String::new(),
    }
}

fn dump(value: &Value, indent: usize) {
    let pad = "  ".repeat(indent);
    let name = if value.name().is_empty() {
        "<anonymous>"
    } else {
        value.name()
    };
    match value.payload() {
        Payload::Container(c) => {
            println!("{}{} ({}, {} entries)", pad, name, value.type_tag(), c.len());
            for child in c {
                dump(child, indent + 1);
            }
        }
        Payload::Array(a) => {
            println!("{}{} ({}, {} elements)", pad, name, value.type_tag(), a.len());
            for element in a {
                dump(element, indent + 1);
            }
        }
        _ => {
            println!("{}{} ({}) = {}", pad, name, value.type_tag(), format_scalar(value));
        }
    }
}

fn count_nodes(value: &Value) -> usize {
    match value.payload() {
        Payload::Container(c) => 1 + c.iter().map(count_nodes).sum::<usize>(),
        Payload::Array(a) => 1 + a.iter().map(count_nodes).sum::<usize>(),
        _ => 1,
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "record.bin".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let value = decode_value(&data, &Limits::default()).expect("Failed to decode");

    println!("\n=== Record ({} nodes) ===", count_nodes(&value));
    dump(&value, 0);
}
