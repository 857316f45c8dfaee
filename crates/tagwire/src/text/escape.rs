//! Backslash escaping for the text wire grammar.
//!
//! Seven characters carry structure in the grammar and are escaped with a
//! preceding backslash: `\` `[` `]` `;` `,` `{` `}`. Everything else passes
//! through untouched, so arbitrary UTF-8 payload text survives the wire.

use crate::error::DecodeError;

/// Returns true for the seven characters that must be escaped.
pub fn needs_escape(c: char) -> bool {
    matches!(c, '\\' | '[' | ']' | ';' | ',' | '{' | '}')
}

/// Escapes structural characters into `out`.
pub fn escape_into(s: &str, out: &mut String) {
    for c in s.chars() {
        if needs_escape(c) {
            out.push('\\');
        }
        out.push(c);
    }
}

/// Returns an escaped copy of `s`.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    escape_into(s, &mut out);
    out
}

/// Reverses [`escape`].
///
/// Rejects a trailing lone backslash and backslashes followed by anything
/// other than the seven escapable characters.
pub fn unescape(s: &str) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped) if needs_escape(escaped) => out.push(escaped),
            Some(_) => {
                return Err(DecodeError::BadEscape {
                    context: "unknown escape sequence",
                })
            }
            None => {
                return Err(DecodeError::BadEscape {
                    context: "trailing backslash",
                })
            }
        }
    }
    Ok(out)
}
