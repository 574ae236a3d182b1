//! Value rendering with interned-name resolution.
//!
//! `Value`'s `Display` impl cannot resolve `Name`s; the `fmt` package
//! natives use this module so user functions and struct fields print with
//! their real identifiers.

use crate::{Name, StringInterner, Value};

/// Render a value, resolving interned names through `interner`.
pub fn format_value(value: &Value, interner: &StringInterner) -> String {
    match value {
        Value::Int(v) => v.to_string(),
        Value::Str(s) => s.as_str().to_owned(),
        Value::Bool(v) => v.to_string(),
        Value::Native(f) => format!("<native {}>", f.name()),
        Value::Func(name) => format!("<func {}>", interner.lookup(*name)),
        Value::Slice(s) => format_sequence(&s.to_vec(), interner),
        Value::Array(a) => format_sequence(a.elements(), interner),
        Value::Struct(s) => {
            // Field iteration order is unspecified; sort by name for a
            // stable rendering.
            let mut fields: Vec<(Name, &Value)> = s.fields().collect();
            fields.sort_by_key(|(name, _)| interner.lookup(*name));
            let rendered: Vec<String> = fields
                .iter()
                .map(|(name, v)| {
                    format!("{}: {}", interner.lookup(*name), format_value(v, interner))
                })
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        Value::Void => String::new(),
    }
}

fn format_sequence(elems: &[Value], interner: &StringInterner) -> String {
    let rendered: Vec<String> = elems.iter().map(|v| format_value(v, interner)).collect();
    format!("[{}]", rendered.join(" "))
}
