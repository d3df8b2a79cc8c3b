//! Lexical scanners over a byte suffix.
//!
//! Every scanner takes the unconsumed tail of the input and returns the
//! recognized token together with the bytes that follow it. Nothing here
//! allocates or keeps state; the [`Parser`](crate::Parser) decides which
//! scanner to run from the first byte and moves its cursor to the start of
//! the returned rest.
//!
//! Failures carry `at`, a sub-slice of the scanned input pointing at the
//! offending bytes, so the caller can turn it back into a [`Span`](crate::Span).

use crate::{ErrorKind, Kind};

#[cfg(test)]
#[path = "./scan_tests.rs"]
mod tests;

/// A scanner failure, positioned by a sub-slice of the input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError<'a> {
    pub at: &'a [u8],
    pub kind: ErrorKind,
}

impl<'a> ScanError<'a> {
    fn new(at: &'a [u8], kind: ErrorKind) -> Self {
        ScanError { at, kind }
    }
}

/// `(token, rest)` or a positioned failure.
pub type Scanned<'a> = Result<(&'a [u8], &'a [u8]), ScanError<'a>>;

/// `(kind, token, rest)` for scanners that also classify what they read.
pub type Classified<'a> = Result<(Kind, &'a [u8], &'a [u8]), ScanError<'a>>;

#[inline]
pub fn is_keylike_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Control characters other than tab, plus DEL.
#[inline]
fn is_control(b: u8) -> bool {
    (b < 0x20 && b != b'\t') || b == 0x7F
}

/// Describe the token at the start of `b` and how many bytes it spans, for
/// "expected X, found Y" errors.
pub fn describe_token(b: &[u8]) -> (&'static str, usize) {
    match b.first() {
        None => ("eof", 0),
        Some(b'\n' | b'\r') => ("a newline", 1),
        Some(b' ' | b'\t') => ("whitespace", scan_whitespace(b).0.len()),
        Some(b'#') => ("a comment", 1),
        Some(b'=') => ("an equals", 1),
        Some(b'.') => ("a period", 1),
        Some(b',') => ("a comma", 1),
        Some(b':') => ("a colon", 1),
        Some(b'+') => ("a plus", 1),
        Some(b'{') => ("a left brace", 1),
        Some(b'}') => ("a right brace", 1),
        Some(b'[') => ("a left bracket", 1),
        Some(b']') => ("a right bracket", 1),
        Some(b'\'' | b'"') => ("a string", 1),
        Some(&c) if is_keylike_byte(c) => {
            let len = b.iter().take_while(|&&c| is_keylike_byte(c)).count();
            ("an identifier", len)
        }
        Some(_) => ("a character", 1),
    }
}

/// Decode the character starting at `b[0]` for error messages. Invalid
/// UTF-8 shows up as the replacement character.
pub fn char_at(b: &[u8]) -> char {
    let len = match b.first() {
        None => return char::REPLACEMENT_CHARACTER,
        Some(&c) if c < 0x80 => return c as char,
        Some(&c) if c >= 0xF0 => 4,
        Some(&c) if c >= 0xE0 => 3,
        Some(_) => 2,
    };
    match b.get(..len).map(std::str::from_utf8) {
        Some(Ok(s)) => s.chars().next().unwrap_or(char::REPLACEMENT_CHARACTER),
        _ => char::REPLACEMENT_CHARACTER,
    }
}

/// Spaces and tabs. An empty match is fine.
pub fn scan_whitespace(b: &[u8]) -> (&[u8], &[u8]) {
    let len = b.iter().take_while(|&&c| c == b' ' || c == b'\t').count();
    b.split_at(len)
}

/// A `#` comment up to, but not including, the line terminator.
pub fn scan_comment(b: &[u8]) -> Scanned<'_> {
    debug_assert_eq!(b.first(), Some(&b'#'));
    let mut i = 1;
    while let Some(&c) = b.get(i) {
        match c {
            b'\n' => break,
            b'\r' if b.get(i + 1) == Some(&b'\n') => break,
            c if is_control(c) => {
                return Err(ScanError::new(
                    &b[i..i + 1],
                    ErrorKind::InvalidCharInComment(c as char),
                ));
            }
            _ => i += 1,
        }
    }
    Ok(b.split_at(i))
}

/// `\n` or `\r\n`.
pub fn scan_newline(b: &[u8]) -> Scanned<'_> {
    match b.first() {
        Some(b'\n') => Ok(b.split_at(1)),
        Some(b'\r') => scan_windows_newline(b),
        _ => {
            let (found, len) = describe_token(b);
            Err(ScanError::new(
                &b[..len],
                ErrorKind::Wanted {
                    expected: "a newline",
                    found,
                },
            ))
        }
    }
}

/// `\r\n`. A `\r` on its own is rejected.
pub fn scan_windows_newline(b: &[u8]) -> Scanned<'_> {
    if b.starts_with(b"\r\n") {
        Ok(b.split_at(2))
    } else {
        Err(ScanError::new(&b[..1.min(b.len())], ErrorKind::Unexpected('\r')))
    }
}

/// One or more of `A-Z a-z 0-9 - _`.
pub fn scan_unquoted_key(b: &[u8]) -> Scanned<'_> {
    let len = b.iter().take_while(|&&c| is_keylike_byte(c)).count();
    if len == 0 {
        let (found, len) = describe_token(b);
        return Err(ScanError::new(
            &b[..len],
            ErrorKind::Wanted {
                expected: "a key",
                found,
            },
        ));
    }
    Ok(b.split_at(len))
}

/// `b` begins with the exact bytes of `literal`.
#[inline]
pub fn follows_literal(b: &[u8], literal: &[u8]) -> bool {
    b.starts_with(literal)
}

/// `b` begins with three `quote` bytes.
#[inline]
pub fn follows_multiline_delimiter(b: &[u8], quote: u8) -> bool {
    b.len() >= 3 && b[..3] == [quote; 3]
}

/// A single-line string delimited by `quote`. In basic strings a backslash
/// takes the following byte with it; the escape itself is checked when the
/// contents are decoded.
fn scan_single_line(b: &[u8], quote: u8) -> Scanned<'_> {
    debug_assert_eq!(b.first(), Some(&quote));
    let escapes = quote == b'"';
    let mut i = 1;
    while let Some(&c) = b.get(i) {
        match c {
            c if c == quote => return Ok(b.split_at(i + 1)),
            b'\\' if escapes => i += 2,
            c if is_control(c) => {
                return Err(ScanError::new(
                    &b[i..i + 1],
                    ErrorKind::InvalidCharInString(c as char),
                ));
            }
            _ => i += 1,
        }
    }
    Err(ScanError::new(&b[..1], ErrorKind::UnterminatedString))
}

/// A string delimited by three `quote` bytes. Up to two quotes directly in
/// front of the closing delimiter are part of the contents.
fn scan_multiline(b: &[u8], quote: u8) -> Scanned<'_> {
    debug_assert!(follows_multiline_delimiter(b, quote));
    let escapes = quote == b'"';
    let mut i = 3;
    while let Some(&c) = b.get(i) {
        match c {
            c if c == quote => {
                let run = b[i..].iter().take_while(|&&c| c == quote).count();
                if run >= 3 {
                    return Ok(b.split_at(i + run.min(5)));
                }
                i += run;
            }
            b'\\' if escapes => i += 2,
            b'\n' => i += 1,
            b'\r' if b.get(i + 1) == Some(&b'\n') => i += 2,
            c if is_control(c) => {
                return Err(ScanError::new(
                    &b[i..i + 1],
                    ErrorKind::InvalidCharInString(c as char),
                ));
            }
            _ => i += 1,
        }
    }
    Err(ScanError::new(&b[..3], ErrorKind::UnterminatedString))
}

/// `'...'`, with the quotes included in the token.
pub fn scan_literal_string(b: &[u8]) -> Scanned<'_> {
    scan_single_line(b, b'\'')
}

/// `"..."`, with the quotes included in the token.
pub fn scan_basic_string(b: &[u8]) -> Scanned<'_> {
    scan_single_line(b, b'"')
}

/// `'''...'''`, with the delimiters included in the token.
pub fn scan_multiline_literal_string(b: &[u8]) -> Scanned<'_> {
    scan_multiline(b, b'\'')
}

/// `"""..."""`, with the delimiters included in the token.
pub fn scan_multiline_basic_string(b: &[u8]) -> Scanned<'_> {
    scan_multiline(b, b'"')
}

/// Length of a line terminator at the start of `b`, if any.
pub fn newline_len(b: &[u8]) -> usize {
    if b.starts_with(b"\n") {
        1
    } else if b.starts_with(b"\r\n") {
        2
    } else {
        0
    }
}

/// Decide between the date/time scanner and the number scanner from at
/// most the first five bytes: a `:` at offset 2 (`07:32`) or a `-` at
/// offset 4 (`1979-`) means a date or time.
pub fn looks_like_datetime(b: &[u8]) -> bool {
    if b.len() < 3 || matches!(b[0], b'+' | b'-') {
        return false;
    }
    for (i, &c) in b.iter().take(5).enumerate() {
        if c.is_ascii_digit() {
            continue;
        }
        if (i == 2 && c == b':') || (i == 4 && c == b'-') {
            return true;
        }
    }
    false
}

/// Consume a date, time or date-time and classify it.
///
/// Takes digits and `T : . + - Z`, plus one space when a digit follows it
/// (`1979-05-27 07:32:00`). The literal is not validated beyond that.
pub fn scan_datetime(b: &[u8]) -> Classified<'_> {
    // Offset of the earliest `-` that can start a `-07:00` offset rather
    // than separate date fields.
    const MIN_OFFSET_OF_TZ: usize = 8;

    let mut has_time = false;
    let mut has_tz = false;
    let mut seen_space = false;

    let mut i = 0;
    while let Some(&c) = b.get(i) {
        match c {
            b'0'..=b'9' => {}
            b'-' => {
                if i >= MIN_OFFSET_OF_TZ {
                    has_tz = true;
                }
            }
            b'T' | b':' | b'.' => has_time = true,
            b'+' | b'Z' => has_tz = true,
            b' ' if !seen_space && b.get(i + 1).is_some_and(u8::is_ascii_digit) => {
                seen_space = true;
                has_time = true;
            }
            _ => break,
        }
        i += 1;
    }

    if i == 0 {
        let (_, len) = describe_token(b);
        return Err(ScanError::new(&b[..len.max(1).min(b.len())], ErrorKind::InvalidNumber));
    }

    let kind = if b.get(2) == Some(&b':') {
        Kind::Time
    } else if has_time && has_tz {
        Kind::DateTime
    } else if has_time {
        Kind::LocalDateTime
    } else {
        Kind::LocalDate
    };
    let (token, rest) = b.split_at(i);
    Ok((kind, token, rest))
}

/// Consume an integer or float literal and classify it.
///
/// `0x`, `0o` and `0b` prefixes take a run of digits of that radix. Other
/// literals take signs, digits and underscores and become floats at the
/// first `.`, `e` or `E`. Digit placement is not validated.
pub fn scan_int_or_float(b: &[u8]) -> Classified<'_> {
    if b.len() > 2 && b[0] == b'0' && b[1] != b'.' {
        let valid: fn(u8) -> bool = match b[1] {
            b'x' => |c| c.is_ascii_hexdigit() || c == b'_',
            b'o' => |c| matches!(c, b'0'..=b'7' | b'_'),
            b'b' => |c| matches!(c, b'0' | b'1' | b'_'),
            _ => {
                let (token, rest) = b.split_at(1);
                return Ok((Kind::Integer, token, rest));
            }
        };
        let len = 2 + b[2..].iter().take_while(|&&c| valid(c)).count();
        let (token, rest) = b.split_at(len);
        return Ok((Kind::Integer, token, rest));
    }

    let mut is_float = false;
    let mut i = 0;
    while let Some(&c) = b.get(i) {
        match c {
            b'0'..=b'9' | b'+' | b'-' | b'_' => {}
            b'.' | b'e' | b'E' => is_float = true,
            b'i' | b'n' => {
                let literal: &[u8] = if c == b'i' { b"inf" } else { b"nan" };
                if follows_literal(&b[i..], literal) {
                    let (token, rest) = b.split_at(i + 3);
                    return Ok((Kind::Float, token, rest));
                }
                return Err(ScanError::new(&b[i..i + 1], ErrorKind::Unexpected(c as char)));
            }
            _ => break,
        }
        i += 1;
    }

    if i == 0 {
        let (_, len) = describe_token(b);
        return Err(ScanError::new(&b[..len.max(1).min(b.len())], ErrorKind::InvalidNumber));
    }

    let kind = if is_float { Kind::Float } else { Kind::Integer };
    let (token, rest) = b.split_at(i);
    Ok((kind, token, rest))
}
