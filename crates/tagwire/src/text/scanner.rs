//! Single-pass scanner for the text wire grammar.
//!
//! The scanner walks the input once, honoring escapes and tracking two
//! independent depth counters: brace depth for `{`/`}` and bracket depth for
//! `[`/`]`. A composite payload contains whole nested records (with their own
//! brackets) and doubled braces, so neither counter alone can delimit it; a
//! payload ends only at an unescaped `]` seen while both counters are zero,
//! immediately followed by `;`.

use crate::error::DecodeError;

/// Cursor over grammar text. Positions are byte offsets and always sit on
/// UTF-8 character boundaries.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    /// Creates a scanner over `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Returns the current byte offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns true once all input is consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns the unconsumed remainder.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.text[self.pos..].chars().next()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes `lit` if the input starts with it.
    pub fn eat(&mut self, lit: &str) -> bool {
        if self.text[self.pos..].starts_with(lit) {
            self.pos += lit.len();
            true
        } else {
            false
        }
    }

    /// Consumes `lit` or fails with the given context.
    pub fn expect(&mut self, lit: &str, context: &'static str) -> Result<(), DecodeError> {
        if self.eat(lit) {
            Ok(())
        } else {
            Err(DecodeError::MalformedRecord { context })
        }
    }

    /// Scans a name or type-name field: raw (still escaped) text up to the
    /// first unescaped `,`, which is consumed.
    pub fn scan_field(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        loop {
            match self.bump() {
                None => {
                    return Err(DecodeError::MalformedRecord {
                        context: "unterminated field",
                    })
                }
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(DecodeError::BadEscape {
                            context: "trailing backslash",
                        });
                    }
                }
                Some(',') => return Ok(&self.text[start..self.pos - 1]),
                Some(_) => {}
            }
        }
    }

    /// Scans a payload field: raw text up to the record's closing unescaped
    /// `];`, which is consumed. Nested records and container braces inside
    /// the payload are skipped via the two depth counters.
    pub fn scan_payload(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        let mut brace = 0usize;
        let mut bracket = 0usize;
        loop {
            match self.bump() {
                None => {
                    return Err(DecodeError::MalformedRecord {
                        context: "unterminated payload",
                    })
                }
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(DecodeError::BadEscape {
                            context: "trailing backslash",
                        });
                    }
                }
                Some('{') => brace += 1,
                Some('}') => {
                    if brace == 0 {
                        return Err(DecodeError::MalformedRecord {
                            context: "unbalanced '}' in payload",
                        });
                    }
                    brace -= 1;
                }
                Some('[') => bracket += 1,
                Some(']') => {
                    if bracket > 0 {
                        bracket -= 1;
                    } else if brace == 0 {
                        let end = self.pos - 1;
                        self.expect(";", "payload terminator")?;
                        return Ok(&self.text[start..end]);
                    }
                    // An unescaped ']' inside container braces is payload
                    // content for the nested parse to deal with.
                }
                Some(_) => {}
            }
        }
    }

    /// Scans a container wrapper name: raw text up to (not including) the
    /// first unescaped `{`.
    pub fn scan_until_brace(&mut self) -> Result<&'a str, DecodeError> {
        let start = self.pos;
        loop {
            let before = self.pos;
            match self.bump() {
                None => {
                    return Err(DecodeError::MalformedContainer {
                        context: "missing container braces",
                    })
                }
                Some('\\') => {
                    if self.bump().is_none() {
                        return Err(DecodeError::BadEscape {
                            context: "trailing backslash",
                        });
                    }
                }
                Some('{') => {
                    self.pos = before;
                    return Ok(&self.text[start..before]);
                }
                Some(_) => {}
            }
        }
    }
}
