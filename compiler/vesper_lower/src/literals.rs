//! Literal token parsing.
//!
//! Integer text follows the host language's base-0 rules: `0x`/`0X` hex,
//! `0o`/`0O` octal, `0b`/`0B` binary, a bare leading zero octal, anything
//! else decimal. `_` digit separators are accepted and ignored.
//!
//! String text has its surrounding quotes stripped and ONLY the
//! two-character `\n` escape substituted; every other escape sequence
//! passes through unchanged. That is a documented limitation of the
//! lowering, not something to silently extend.

use crate::errors::{malformed_int_literal, malformed_string_literal, CompileError};

/// Parse integer literal text into an `i64`.
pub fn parse_int_literal(text: &str) -> Result<i64, CompileError> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    if cleaned.is_empty() || cleaned != cleaned.trim() {
        return Err(malformed_int_literal(text));
    }

    let (digits, radix) = if let Some(rest) = strip_prefix_ignore_case(&cleaned, "0x") {
        (rest, 16)
    } else if let Some(rest) = strip_prefix_ignore_case(&cleaned, "0o") {
        (rest, 8)
    } else if let Some(rest) = strip_prefix_ignore_case(&cleaned, "0b") {
        (rest, 2)
    } else if cleaned.len() > 1 && cleaned.starts_with('0') {
        // Bare leading zero: octal.
        (&cleaned[1..], 8)
    } else {
        (cleaned.as_str(), 10)
    };

    i64::from_str_radix(digits, radix).map_err(|_| malformed_int_literal(text))
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&text[prefix.len()..])
    } else {
        None
    }
}

/// Parse string literal text: strip quotes, substitute `\n` only.
pub fn parse_string_literal(text: &str) -> Result<String, CompileError> {
    let inner = text
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| malformed_string_literal(text))?;
    Ok(inner.replace("\\n", "\n"))
}
