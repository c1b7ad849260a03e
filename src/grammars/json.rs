//! A JSON-like data-format reader.
//!
//! Reads a superset-ish dialect of JSON: `#` comments run to end of line,
//! strings may be single- or double-quoted, and map keys must be quoted
//! strings. Trailing commas inside lists and maps are rejected with a
//! dedicated error. Map entries keep their insertion order.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::engine::{parse, Cursor, Grammar, Parser, Production};
use crate::errors::{Found, ParseError, ParseResult};

/// Reads one complete value from `input`.
pub fn read(input: &str) -> ParseResult<Value> {
    parse(&JsonGrammar, input)
}

/// A parsed data value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(Vec<(String, Value)>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }
}

/// Re-serializes the value as parseable input text.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write_quoted(f, s),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ": {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    write!(f, "\"")?;
    for ch in s.chars() {
        match ch {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            '\u{0008}' => write!(f, "\\b")?,
            '\u{000c}' => write!(f, "\\f")?,
            c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{c}")?,
        }
    }
    write!(f, "\"")
}

// Maps serialize as maps (not as lists of pairs), so derive is not enough.
impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

pub struct JsonGrammar;

impl Grammar for JsonGrammar {
    type Value = Value;

    fn start_rule(&self) -> &'static str {
        "any_type"
    }

    fn production(&self, name: &str) -> Option<Production<Self>> {
        match name {
            "any_type" => Some(any_type),
            "complex_type" => Some(complex_type),
            "primitive_type" => Some(primitive_type),
            "list" => Some(list),
            "map" => Some(map),
            "null" => Some(null),
            "boolean" => Some(boolean),
            "number" => Some(number),
            "quoted_string" => Some(quoted_string),
            _ => None,
        }
    }

    /// Whitespace plus `#` comments running to end of line.
    fn skip_trivia(&self, cursor: &mut Cursor<'_>) {
        let mut in_comment = false;
        while let Some(ch) = cursor.peek() {
            if in_comment {
                if ch == '\n' {
                    in_comment = false;
                }
            } else if ch == '#' {
                in_comment = true;
            } else if !matches!(ch, ' ' | '\t' | '\r' | '\n' | '\x0b' | '\x0c') {
                break;
            }
            cursor.advance();
        }
    }
}

fn any_type(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    p.match_rule(&["complex_type", "primitive_type"])
}

fn complex_type(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    p.match_rule(&["list", "map"])
}

fn primitive_type(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    p.match_rule(&["null", "boolean", "quoted_string", "number"])
}

fn list(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    p.keyword(&["["])?;
    let mut items = Vec::new();
    let mut trailing_comma = false;
    while let Some(item) = p.maybe_match(&["any_type"]) {
        items.push(item);
        if p.maybe_keyword(&[","]).is_none() {
            trailing_comma = false;
            break;
        }
        trailing_comma = true;
    }
    p.keyword(&["]"])?;
    if trailing_comma {
        return Err(ParseError::invalid(
            p.pos(),
            "unnecessary trailing comma",
            p.found(),
        ));
    }
    Ok(Value::List(items))
}

fn map(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    p.keyword(&["{"])?;
    let mut entries = Vec::new();
    let mut trailing_comma = false;
    loop {
        let key = match p.maybe_match(&["quoted_string"]) {
            Some(Value::String(key)) => key,
            Some(other) => {
                return Err(ParseError::invalid(
                    p.pos(),
                    format!("expected a string key, got a {}", other.type_name()),
                    p.found(),
                ))
            }
            None => break,
        };
        p.keyword(&[":"])?;
        let value = p.match_rule(&["any_type"])?;
        entries.push((key, value));
        if p.maybe_keyword(&[","]).is_none() {
            trailing_comma = false;
            break;
        }
        trailing_comma = true;
    }
    p.keyword(&["}"])?;
    if trailing_comma {
        return Err(ParseError::invalid(
            p.pos(),
            "unnecessary trailing comma",
            p.found(),
        ));
    }
    Ok(Value::Map(entries))
}

fn null(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    p.keyword(&["null"])?;
    Ok(Value::Null)
}

fn boolean(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    let literal = p.keyword(&["true", "false"])?;
    Ok(Value::Bool(literal == "true"))
}

fn number(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    let mut text = integer_text(p)?;
    if let Some(fraction) = maybe_fraction_text(p) {
        text.push_str(&fraction);
    }
    if let Some(exponent) = maybe_exponent_text(p) {
        text.push_str(&exponent);
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| ParseError::invalid(p.pos(), format!("invalid number `{text}`"), p.found()))?;
    Ok(Value::Number(value))
}

/// Integer part: optional `-`, then either a lone `0` or a nonzero digit
/// followed by any digits. A leading zero never swallows further digits.
fn integer_text(p: &mut Parser<JsonGrammar>) -> ParseResult<String> {
    let mut text = String::new();
    if let Some(sign) = p.maybe_char("-") {
        text.push(sign);
    }
    let first = p.char("0-9")?;
    text.push(first);
    if first != '0' {
        while let Some(digit) = p.maybe_char("0-9") {
            text.push(digit);
        }
    }
    Ok(text)
}

/// `.` followed by at least one digit; a bare `.` is backtracked entirely.
fn maybe_fraction_text(p: &mut Parser<JsonGrammar>) -> Option<String> {
    let mark = p.save();
    let mut text = String::from(p.maybe_char(".")?);
    match p.char("0-9") {
        Ok(digit) => text.push(digit),
        Err(_) => {
            p.restore(mark);
            return None;
        }
    }
    while let Some(digit) = p.maybe_char("0-9") {
        text.push(digit);
    }
    Some(text)
}

/// `e`/`E`, optional sign, at least one digit; backtracked as a whole when
/// the digits are missing.
fn maybe_exponent_text(p: &mut Parser<JsonGrammar>) -> Option<String> {
    let mark = p.save();
    let mut text = String::from(p.maybe_char("eE")?);
    if let Some(sign) = p.maybe_char("+-") {
        text.push(sign);
    }
    match p.char("0-9") {
        Ok(digit) => text.push(digit),
        Err(_) => {
            p.restore(mark);
            return None;
        }
    }
    while let Some(digit) = p.maybe_char("0-9") {
        text.push(digit);
    }
    Some(text)
}

fn quoted_string(p: &mut Parser<JsonGrammar>) -> ParseResult<Value> {
    let quote = p.char("\"'")?;
    let mut out = String::new();

    loop {
        let at = p.pos();
        let ch = p.char("")?;
        if ch == quote {
            break;
        }
        if ch == '\\' {
            let escape_at = p.pos();
            let escape = p.char("")?;
            match escape {
                'b' => out.push('\u{0008}'),
                'f' => out.push('\u{000c}'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                '\\' => out.push('\\'),
                '/' => out.push('/'),
                'u' => out.push(unicode_escape(p)?),
                c if c == quote => out.push(quote),
                _ => {
                    return Err(ParseError::invalid(
                        escape_at,
                        format!("invalid escape sequence `\\{escape}`"),
                        Found::Char(escape),
                    ))
                }
            }
        } else if ch.is_control() {
            return Err(ParseError::invalid(
                at,
                "unescaped control character in string",
                Found::Char(ch),
            ));
        } else {
            out.push(ch);
        }
    }

    Ok(Value::String(out))
}

fn unicode_escape(p: &mut Parser<JsonGrammar>) -> ParseResult<char> {
    let at = p.pos();
    let mut code = String::new();
    for _ in 0..4 {
        code.push(p.char("0-9a-fA-F")?);
    }
    // The four hex digits are already validated; only surrogate halves can
    // fail the conversion.
    let point = u32::from_str_radix(&code, 16).map_err(|_| {
        ParseError::invalid(at, format!("invalid unicode escape `\\u{code}`"), p.found())
    })?;
    char::from_u32(point).ok_or_else(|| {
        ParseError::invalid(at, format!("invalid unicode escape `\\u{code}`"), p.found())
    })
}
