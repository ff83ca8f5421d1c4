//! Parser for flat `key=value` property text.
//!
//! Supports the usual property-file syntax:
//! - `#` and `!` comment lines, blank lines
//! - `=`, `:`, or whitespace between key and value
//! - trailing-backslash continuation (leading whitespace of the next line is
//!   dropped); an even run of backslashes is literal
//! - `\t`, `\n`, `\r`, `\f`, `\uXXXX` escapes, any other escaped character
//!   stands for itself
//!
//! Keys and values are whitespace-trimmed. Whitespace that was written as an
//! escape is kept.

use std::io::Read;

use testprops_utils::error::{PropertyError, TestPropsError};

/// One parsed `key=value` pair, in file order.
pub type Property = (String, String);

/// Read a whole stream and parse it as property text.
///
/// Bytes are decoded as UTF-8; input that is not valid UTF-8 is decoded as
/// ISO-8859-1 instead, so legacy Latin-1 files still load.
pub fn read_properties<R: Read>(mut reader: R) -> Result<Vec<Property>, TestPropsError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let text = decode(bytes);
    Ok(parse_properties(&text)?)
}

/// Parse property text into pairs. Later duplicates are kept; callers that
/// insert into a map get last-one-wins.
pub fn parse_properties(text: &str) -> Result<Vec<Property>, PropertyError> {
    logical_lines(text)
        .into_iter()
        .map(|line| {
            let (raw_key, raw_value) = split_key_value(&line.text);
            let key = unescape(raw_key, line.number, false)?;
            let value = unescape(raw_value, line.number, true)?;
            Ok((key, value))
        })
        .collect()
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => e.into_bytes().iter().map(|&b| char::from(b)).collect(),
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

#[derive(Debug)]
struct LogicalLine {
    /// 1-based number of the first natural line.
    number: usize,
    text: String,
}

fn natural_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\r', '\n']) {
            Some(idx) => {
                let line = &rest[..idx];
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

fn ends_with_continuation(line: &str) -> bool {
    let trailing = line.bytes().rev().take_while(|&b| b == b'\\').count();
    trailing % 2 == 1
}

fn logical_lines(text: &str) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut lines = natural_lines(text).enumerate();

    while let Some((idx, raw)) = lines.next() {
        let line = raw.trim_start_matches(is_blank);
        // Comments are only recognized at the start of a logical line.
        if line.is_empty() || line.starts_with(['#', '!']) {
            continue;
        }

        let mut joined = String::with_capacity(line.len());
        let mut current = line;
        while ends_with_continuation(current) {
            joined.push_str(&current[..current.len() - 1]);
            match lines.next() {
                Some((_, next)) => current = next.trim_start_matches(is_blank),
                None => {
                    current = "";
                    break;
                }
            }
        }
        joined.push_str(current);

        out.push(LogicalLine {
            number: idx + 1,
            text: joined,
        });
    }

    out
}

/// Split at the first unescaped `=`, `:`, or whitespace. Returns the raw
/// (still escaped) key and value.
fn split_key_value(line: &str) -> (&str, &str) {
    let mut preceding_backslash = false;
    let mut key_end = line.len();
    let mut value_start = line.len();
    let mut has_separator = false;

    for (i, c) in line.char_indices() {
        if !preceding_backslash {
            if c == '=' || c == ':' {
                key_end = i;
                value_start = i + 1;
                has_separator = true;
                break;
            }
            if is_blank(c) {
                key_end = i;
                value_start = i + 1;
                break;
            }
        }
        preceding_backslash = c == '\\' && !preceding_backslash;
    }

    let mut rest = line[value_start..].trim_start_matches(is_blank);
    if !has_separator && let Some(stripped) = rest.strip_prefix(['=', ':']) {
        rest = stripped.trim_start_matches(is_blank);
    }

    (&line[..key_end], rest)
}

fn unescape(raw: &str, line: usize, trim_end: bool) -> Result<String, PropertyError> {
    let mut units: Vec<u16> = Vec::with_capacity(raw.len());
    let mut keep = 0;
    let mut buf = [0u16; 2];
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            units.extend_from_slice(c.encode_utf16(&mut buf));
            if !is_blank(c) {
                keep = units.len();
            }
            continue;
        }

        let Some(escaped) = chars.next() else {
            break;
        };
        match escaped {
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                if hex.chars().count() != 4 || !hex.chars().all(|h| h.is_ascii_hexdigit()) {
                    return Err(PropertyError::MalformedEscape { line });
                }
                let unit = u16::from_str_radix(&hex, 16)
                    .map_err(|_| PropertyError::MalformedEscape { line })?;
                units.push(unit);
            }
            't' => units.push(u16::from(b'\t')),
            'n' => units.push(u16::from(b'\n')),
            'r' => units.push(u16::from(b'\r')),
            'f' => units.push(0x0c),
            other => units.extend_from_slice(other.encode_utf16(&mut buf)),
        }
        keep = units.len();
    }

    if trim_end {
        units.truncate(keep);
    }
    // \uXXXX escapes may form surrogate pairs; lone surrogates become U+FFFD.
    Ok(String::from_utf16_lossy(&units))
}
