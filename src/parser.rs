// Deliberately avoid `?` operator throughout this module for compile-time
// performance: explicit match/if-let prevents the compiler from generating
// From::from conversion and drop-glue machinery at every call site.
#![allow(clippy::question_mark)]

use crate::{
    Arena, Kind, Span,
    builder::{Builder, Node, Reference},
    decoration::Decorations,
    error::{Error, ErrorKind},
    scan::{self, ScanError, is_keylike_byte},
    tree::{Expression, NodeRef},
};

// ---------------------------------------------------------------------------
// Lightweight internal error -- zero-sized, no drop glue.
// When a method returns Err(ParseError), the full error details have already
// been written into Parser::error_kind / Parser::error_span.
// ---------------------------------------------------------------------------

#[derive(Copy, Clone)]
struct ParseError;

/// Parser settings, fixed at construction.
#[derive(Copy, Clone, Default, PartialEq, Eq, Debug)]
pub struct Options {
    /// Keep comments, whitespace and punctuation as nodes and decorations
    /// so the input can be reproduced byte for byte.
    pub lossless: bool,
}

// ---------------------------------------------------------------------------
// Parser
// ---------------------------------------------------------------------------

/// Pull parser producing one top-level expression at a time.
///
/// ```
/// use toml_cst::{Arena, Kind, Parser};
///
/// let arena = Arena::new();
/// let mut parser = Parser::new(&arena);
/// parser.reset("[server]\nport = 8080\n");
///
/// let mut kinds = Vec::new();
/// while let Some(expr) = parser.next_expression() {
///     kinds.push(expr.kind());
/// }
/// assert_eq!(kinds, [Kind::Table, Kind::KeyValue]);
/// assert!(parser.finish().is_ok());
/// ```
pub struct Parser<'a> {
    arena: &'a Arena,
    bytes: &'a [u8],
    cursor: usize,
    lossless: bool,

    // Per-pull state
    first: bool,
    newline: Span,
    root: Reference,
    builder: Builder<'a>,
    decorations: Option<Decorations<'a>>,

    // Error context -- populated just before returning ParseError
    error_span: Span,
    error_kind: Option<ErrorKind>,
    error: Option<Error>,

    // Reusable scratch buffer for escape decoding
    string_buf: Vec<u8>,
}

impl<'a> Parser<'a> {
    /// A parser that only keeps semantic nodes.
    pub fn new(arena: &'a Arena) -> Self {
        Self::with_options(arena, Options::default())
    }

    /// A parser that keeps every byte of the input.
    pub fn lossless(arena: &'a Arena) -> Self {
        Self::with_options(arena, Options { lossless: true })
    }

    pub fn with_options(arena: &'a Arena, options: Options) -> Self {
        Parser {
            arena,
            bytes: &[],
            cursor: 0,
            lossless: options.lossless,
            first: true,
            newline: Span::default(),
            root: Reference::INVALID,
            builder: Builder::new(),
            decorations: if options.lossless {
                Some(Decorations::new())
            } else {
                None
            },
            error_span: Span::default(),
            error_kind: None,
            error: None,
            string_buf: Vec::new(),
        }
    }

    pub fn is_lossless(&self) -> bool {
        self.lossless
    }

    /// Start over on a new input. Clears any previous error.
    pub fn reset<S: AsRef<[u8]> + ?Sized>(&mut self, input: &'a S) {
        let bytes = input.as_ref();
        self.bytes = bytes;
        self.cursor = 0;
        self.first = true;
        self.newline = Span::default();
        self.root = Reference::INVALID;
        self.builder.reset();
        if let Some(decorations) = &mut self.decorations {
            decorations.clear();
        }
        self.error_kind = None;
        self.error = None;

        tracing::trace!(len = bytes.len(), lossless = self.lossless, "reset");

        if bytes.len() > u32::MAX as usize {
            let error = Error {
                kind: ErrorKind::FileTooLarge,
                span: Span::new(0, 0),
                line_info: None,
            };
            tracing::debug!(kind = %error.kind, "input rejected");
            self.error = Some(error);
        }
    }

    /// Parse the next expression.
    ///
    /// Returns `None` once the input is exhausted or an error was found;
    /// the two are told apart with [`Parser::error`]. The returned view
    /// borrows the parser because its nodes are recycled by the next pull.
    pub fn next_expression(&mut self) -> Option<Expression<'_, 'a>> {
        if self.error.is_some() {
            return None;
        }

        self.builder.reset();
        if let Some(decorations) = &mut self.decorations {
            decorations.clear();
        }
        self.root = Reference::INVALID;

        loop {
            if self.cursor == self.bytes.len() {
                return None;
            }
            let newline_start = self.cursor;
            if self.first {
                self.first = false;
            } else if self.eat_line_terminator().is_err() {
                self.fail();
                return None;
            }
            self.newline = Span::new(newline_start as u32, self.cursor as u32);

            match self.expression() {
                Ok(root) if root.is_valid() => {
                    self.root = root;
                    break;
                }
                Ok(_) => continue,
                Err(_) => {
                    self.fail();
                    return None;
                }
            }
        }

        let root = match NodeRef::new(
            &self.builder,
            self.decorations.as_ref(),
            self.bytes,
            self.root,
        ) {
            Some(root) => root,
            None => return None,
        };
        tracing::trace!(
            kind = %root.kind(),
            start = root.raw().start,
            end = root.raw().end,
            "expression"
        );
        Some(Expression {
            root,
            newline: self.newline.slice(self.bytes),
        })
    }

    /// The error that stopped parsing, if any.
    pub fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Consume the parser, returning the error that stopped it, if any.
    pub fn finish(self) -> Result<(), Error> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Source bytes covered by `span`.
    ///
    /// A pulled [`Expression`] borrows the parser mutably, so while one is
    /// alive use [`NodeRef::text`] instead. This is for spans kept past the
    /// pull, such as error spans or ones copied out of a node.
    ///
    /// # Panics
    ///
    /// Panics if `span` lies outside of the current input.
    pub fn raw(&self, span: Span) -> &'a [u8] {
        span.slice(self.bytes)
    }

    // -- error helpers ------------------------------------------------------

    #[cold]
    fn set_error(&mut self, start: usize, end: Option<usize>, kind: ErrorKind) -> ParseError {
        let len = self.bytes.len();
        let start = start.min(len);
        let end = end.unwrap_or(start + 1).clamp(start, len);
        self.error_span = Span::new(start as u32, end as u32);
        self.error_kind = Some(kind);
        ParseError
    }

    #[cold]
    fn scan_failed(&mut self, err: ScanError<'a>) -> ParseError {
        let start = self.offset_of(err.at);
        self.set_error(start, Some(start + err.at.len()), err.kind)
    }

    fn take_error(&mut self) -> Error {
        let kind = match self.error_kind.take() {
            Some(kind) => kind,
            None => ErrorKind::UnexpectedEof,
        };
        let span = self.error_span;
        let line_info = Some(self.to_linecol(span.start as usize));
        Error {
            kind,
            span,
            line_info,
        }
    }

    #[cold]
    fn fail(&mut self) {
        let error = self.take_error();
        tracing::debug!(
            kind = %error.kind,
            start = error.span.start,
            end = error.span.end,
            "parse failed"
        );
        self.error = Some(error);
    }

    fn to_linecol(&self, offset: usize) -> (usize, usize) {
        let mut line_start = 0;
        let mut line_num = 0;
        for (i, &b) in self.bytes.iter().enumerate() {
            if i >= offset {
                return (line_num, offset - line_start);
            }
            if b == b'\n' {
                line_num += 1;
                line_start = i + 1;
            }
        }
        (line_num, offset - line_start)
    }

    // -- cursor operations --------------------------------------------------

    #[inline]
    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.cursor..]
    }

    /// Move the cursor to the start of a suffix returned by a scanner.
    #[inline]
    fn seek(&mut self, rest: &'a [u8]) {
        self.cursor = self.bytes.len() - rest.len();
    }

    fn offset_of(&self, at: &[u8]) -> usize {
        let a = self.bytes.as_ptr() as usize;
        let b = at.as_ptr() as usize;
        assert!(a <= b && b <= a + self.bytes.len());
        b - a
    }

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.cursor).copied()
    }

    #[inline]
    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.cursor + offset).copied()
    }

    #[inline]
    fn eat_byte(&mut self, b: u8) -> bool {
        if self.peek_byte() == Some(b) {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    fn expect_byte(&mut self, b: u8) -> Result<(), ParseError> {
        if self.eat_byte(b) {
            Ok(())
        } else {
            Err(self.wanted(byte_describe(b)))
        }
    }

    /// `Wanted` error for the token at the cursor.
    #[cold]
    fn wanted(&mut self, expected: &'static str) -> ParseError {
        let start = self.cursor;
        let (found, len) = scan::describe_token(self.rest());
        self.set_error(start, Some(start + len), ErrorKind::Wanted { expected, found })
    }

    fn eat_whitespace(&mut self) -> &'a [u8] {
        let (ws, rest) = scan::scan_whitespace(self.rest());
        self.seek(rest);
        ws
    }

    fn eat_comment(&mut self) -> Result<Span, ParseError> {
        let start = self.cursor;
        match scan::scan_comment(self.rest()) {
            Ok((_, rest)) => {
                self.seek(rest);
                Ok(Span::new(start as u32, self.cursor as u32))
            }
            Err(e) => Err(self.scan_failed(e)),
        }
    }

    fn eat_line_terminator(&mut self) -> Result<Span, ParseError> {
        let start = self.cursor;
        match scan::scan_newline(self.rest()) {
            Ok((_, rest)) => {
                self.seek(rest);
                Ok(Span::new(start as u32, self.cursor as u32))
            }
            Err(e) => Err(self.scan_failed(e)),
        }
    }

    /// Checks that only a line terminator or the end of input follows,
    /// without consuming it.
    fn expect_line_end(&mut self) -> Result<(), ParseError> {
        match self.peek_byte() {
            None | Some(b'\n') => Ok(()),
            Some(b'\r') if self.peek_byte_at(1) == Some(b'\n') => Ok(()),
            Some(b'\r') => Err(self.set_error(self.cursor, None, ErrorKind::Unexpected('\r'))),
            Some(_) => Err(self.wanted("a newline")),
        }
    }

    // -- node helpers -------------------------------------------------------

    fn push_leaf(&mut self, kind: Kind, start: usize, end: usize, data: &'a [u8]) -> Reference {
        self.builder
            .push(Node::new(kind, Span::new(start as u32, end as u32), data))
    }

    /// A leaf whose data is its own source text.
    fn push_token(&mut self, kind: Kind, start: usize, end: usize) -> Reference {
        let data = &self.bytes[start..end];
        self.push_leaf(kind, start, end, data)
    }

    fn close(&mut self, node: Reference, start: usize) {
        let end = self.cursor;
        self.builder
            .node_at(node)
            .set_raw(Span::new(start as u32, end as u32));
    }

    fn set_before(&mut self, node: Reference, ws: &'a [u8]) {
        if let Some(decorations) = &mut self.decorations {
            decorations.set_before(node, ws);
        }
    }

    fn set_after(&mut self, node: Reference, ws: &'a [u8]) {
        if let Some(decorations) = &mut self.decorations {
            decorations.set_after(node, ws);
        }
    }

    fn set_comment(&mut self, node: Reference, comment: &'a [u8]) {
        if let Some(decorations) = &mut self.decorations {
            decorations.set_comment(node, comment);
        }
    }

    // -- expressions --------------------------------------------------------

    /// One line of the document. Returns [`Reference::INVALID`] for lines
    /// that produce no node (comments and blank lines outside lossless mode).
    fn expression(&mut self) -> Result<Reference, ParseError> {
        let ws_start = self.cursor;
        let ws = self.eat_whitespace();

        let root = match self.peek_byte() {
            None => {
                if self.lossless {
                    return Ok(self.push_token(Kind::WhiteSpace, ws_start, self.cursor));
                }
                return Ok(Reference::INVALID);
            }
            Some(b'#') => {
                let span = match self.eat_comment() {
                    Ok(span) => span,
                    Err(e) => return Err(e),
                };
                if !self.lossless {
                    return Ok(Reference::INVALID);
                }
                let comment = self.push_token(Kind::Comment, span.start as usize, span.end as usize);
                self.set_before(comment, ws);
                return Ok(comment);
            }
            Some(b'\n' | b'\r') => {
                if self.lossless {
                    return Ok(self.push_token(Kind::WhiteSpace, ws_start, self.cursor));
                }
                return Ok(Reference::INVALID);
            }
            Some(b'[') => match self.table_header() {
                Ok(table) => table,
                Err(e) => return Err(e),
            },
            Some(_) => match self.key_value() {
                Ok(kv) => kv,
                Err(e) => return Err(e),
            },
        };
        self.set_before(root, ws);

        let ws = self.eat_whitespace();
        self.set_after(root, ws);
        if self.peek_byte() == Some(b'#') {
            match self.eat_comment() {
                Ok(span) => {
                    let comment = span.slice(self.bytes);
                    self.set_comment(root, comment);
                }
                Err(e) => return Err(e),
            }
        }
        if let Err(e) = self.expect_line_end() {
            return Err(e);
        }
        Ok(root)
    }

    /// `[key]` or `[[key]]`.
    fn table_header(&mut self) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let is_array = self.peek_byte_at(1) == Some(b'[');
        let kind = if is_array {
            Kind::ArrayTable
        } else {
            Kind::Table
        };
        let table = self.builder.push(Node::open(kind));
        self.cursor += if is_array { 2 } else { 1 };

        let ws = self.eat_whitespace();
        let (first, last) = match self.key() {
            Ok(segments) => segments,
            Err(e) => return Err(e),
        };
        self.set_before(first, ws);
        let ws = self.eat_whitespace();
        self.set_after(last, ws);
        self.builder.attach_child(table, first);

        if let Err(e) = self.expect_byte(b']') {
            return Err(e);
        }
        if is_array && let Err(e) = self.expect_byte(b']') {
            return Err(e);
        }
        self.close(table, start);
        Ok(table)
    }

    /// `key = value`. The value is the first child and the key segments are
    /// chained after it, followed by the `=` in lossless mode.
    fn key_value(&mut self) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let kv = self.builder.push(Node::open(Kind::KeyValue));

        let (first, last) = match self.key() {
            Ok(segments) => segments,
            Err(e) => return Err(e),
        };

        let ws = self.eat_whitespace();
        let equals = self.cursor;
        if let Err(e) = self.expect_byte(b'=') {
            return Err(e);
        }
        let ws2 = self.eat_whitespace();
        if self.lossless {
            let symbol = self.push_token(Kind::Symbol, equals, equals + 1);
            self.builder.chain(last, symbol);
            self.set_before(symbol, ws);
            self.set_after(symbol, ws2);
        }

        let value = match self.value() {
            Ok(value) => value,
            Err(e) => return Err(e),
        };
        self.builder.attach_child(kv, value);
        self.builder.chain(value, first);
        self.close(kv, start);
        Ok(kv)
    }

    // -- keys ---------------------------------------------------------------

    /// A dotted key. Returns the first and last segment; segments are
    /// chained as siblings, and in lossless mode each `.` is the first child
    /// of the segment after it.
    fn key(&mut self) -> Result<(Reference, Reference), ParseError> {
        let first = match self.simple_key() {
            Ok(key) => key,
            Err(e) => return Err(e),
        };
        let mut last = first;
        loop {
            let before_ws = self.cursor;
            let ws = self.eat_whitespace();
            if self.peek_byte() != Some(b'.') {
                // The whitespace belongs to whatever follows the key.
                self.cursor = before_ws;
                break;
            }
            let dot = self.cursor;
            self.cursor += 1;
            let ws2 = self.eat_whitespace();

            let segment = match self.simple_key() {
                Ok(key) => key,
                Err(e) => return Err(e),
            };
            self.builder.chain(last, segment);
            if self.lossless {
                let symbol = self.push_token(Kind::Symbol, dot, dot + 1);
                self.builder.attach_child(segment, symbol);
                self.set_before(symbol, ws);
                self.set_after(symbol, ws2);
            }
            last = segment;
        }
        Ok((first, last))
    }

    fn simple_key(&mut self) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let data = match self.peek_byte() {
            Some(quote @ (b'"' | b'\'')) => {
                if scan::follows_multiline_delimiter(self.rest(), quote) {
                    return Err(self.set_error(
                        start,
                        Some(start + 3),
                        ErrorKind::MultilineStringKey,
                    ));
                }
                let decoded = if quote == b'"' {
                    self.basic_string()
                } else {
                    self.literal_string()
                };
                match decoded {
                    Ok(data) => data,
                    Err(e) => return Err(e),
                }
            }
            _ => match scan::scan_unquoted_key(self.rest()) {
                Ok((key, rest)) => {
                    self.seek(rest);
                    key
                }
                Err(e) => return Err(self.scan_failed(e)),
            },
        };
        Ok(self.push_leaf(Kind::Key, start, self.cursor, data))
    }

    // -- string parsing -----------------------------------------------------

    /// `'...'` or `'''...'''` at the cursor. Returns the contents.
    fn literal_string(&mut self) -> Result<&'a [u8], ParseError> {
        let start = self.cursor;
        let multiline = scan::follows_multiline_delimiter(self.rest(), b'\'');
        let scanned = if multiline {
            scan::scan_multiline_literal_string(self.rest())
        } else {
            scan::scan_literal_string(self.rest())
        };
        let token = match scanned {
            Ok((token, rest)) => {
                self.seek(rest);
                token
            }
            Err(e) => return Err(self.scan_failed(e)),
        };
        let (open, close) = delimiters(token, multiline);
        Ok(&self.bytes[start + open..start + token.len() - close])
    }

    /// `"..."` or `"""..."""` at the cursor. Returns the decoded contents.
    fn basic_string(&mut self) -> Result<&'a [u8], ParseError> {
        let start = self.cursor;
        let multiline = scan::follows_multiline_delimiter(self.rest(), b'"');
        let scanned = if multiline {
            scan::scan_multiline_basic_string(self.rest())
        } else {
            scan::scan_basic_string(self.rest())
        };
        let token = match scanned {
            Ok((token, rest)) => {
                self.seek(rest);
                token
            }
            Err(e) => return Err(self.scan_failed(e)),
        };
        let (open, close) = delimiters(token, multiline);
        self.decode_basic(start + open, start + token.len() - close, multiline)
    }

    /// Process escapes in `bytes[start..end]`. Contents without a backslash
    /// are returned as a slice of the input; otherwise they are rebuilt in
    /// `string_buf` and committed to the arena.
    fn decode_basic(
        &mut self,
        start: usize,
        end: usize,
        multiline: bool,
    ) -> Result<&'a [u8], ParseError> {
        let content = &self.bytes[start..end];
        let Some(first_escape) = content.iter().position(|&b| b == b'\\') else {
            return Ok(content);
        };

        self.string_buf.clear();
        self.string_buf.extend_from_slice(&content[..first_escape]);

        let mut i = start + first_escape;
        while i < end {
            let b = self.bytes[i];
            if b != b'\\' {
                self.string_buf.push(b);
                i += 1;
                continue;
            }
            i = match self.read_escape(i, end, multiline) {
                Ok(next) => next,
                Err(e) => return Err(e),
            };
        }

        let arena = self.arena;
        Ok(arena.alloc_bytes(&self.string_buf))
    }

    /// Decode the escape whose backslash is at `at`, returning the offset
    /// just past it.
    fn read_escape(&mut self, at: usize, end: usize, multiline: bool) -> Result<usize, ParseError> {
        let i = at + 1;
        if i >= end {
            return Err(self.set_error(at, None, ErrorKind::InvalidEscape('\\')));
        }
        let b = self.bytes[i];
        match b {
            b'"' => self.string_buf.push(b'"'),
            b'\\' => self.string_buf.push(b'\\'),
            b'b' => self.string_buf.push(0x08),
            b'f' => self.string_buf.push(0x0C),
            b'n' => self.string_buf.push(b'\n'),
            b'r' => self.string_buf.push(b'\r'),
            b't' => self.string_buf.push(b'\t'),
            b'u' => return self.read_unicode(at, 4, end),
            b'U' => return self.read_unicode(at, 8, end),
            b' ' | b'\t' | b'\n' | b'\r' if multiline => {
                // A backslash ending a line trims the line terminator and all
                // whitespace up to the next visible character.
                let mut j = i;
                while j < end && matches!(self.bytes[j], b' ' | b'\t') {
                    j += 1;
                }
                let newline = scan::newline_len(&self.bytes[j..end]);
                if newline == 0 {
                    return Err(self.set_error(i, None, ErrorKind::InvalidEscape(b as char)));
                }
                j += newline;
                while j < end && matches!(self.bytes[j], b' ' | b'\t' | b'\n' | b'\r') {
                    j += 1;
                }
                return Ok(j);
            }
            _ => {
                let c = scan::char_at(&self.bytes[i..]);
                return Err(self.set_error(i, Some(i + c.len_utf8()), ErrorKind::InvalidEscape(c)));
            }
        }
        Ok(i + 1)
    }

    /// `\uXXXX` or `\UXXXXXXXX` with the backslash at `at`.
    fn read_unicode(&mut self, at: usize, digits: usize, end: usize) -> Result<usize, ParseError> {
        let first = at + 2;
        let mut value: u32 = 0;
        for n in 0..digits {
            let i = first + n;
            if i >= end {
                return Err(self.set_error(
                    at,
                    Some(end),
                    ErrorKind::ShortUnicodeEscape {
                        expected: digits as u8,
                        found: n as u8,
                    },
                ));
            }
            let b = self.bytes[i];
            let digit = match (b as char).to_digit(16) {
                Some(digit) if b < 0x80 => digit,
                _ => {
                    let c = scan::char_at(&self.bytes[i..]);
                    return Err(self.set_error(
                        i,
                        Some(i + c.len_utf8()),
                        ErrorKind::InvalidHexEscape(c),
                    ));
                }
            };
            value = (value << 4) | digit;
        }

        let next = first + digits;
        match char::from_u32(value) {
            Some(ch) => {
                let mut buf = [0u8; 4];
                let len = ch.encode_utf8(&mut buf).len();
                self.string_buf.extend_from_slice(&buf[..len]);
                Ok(next)
            }
            None => Err(self.set_error(at, Some(next), ErrorKind::InvalidEscapeValue(value))),
        }
    }

    // -- value parsing ------------------------------------------------------

    fn value(&mut self) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let Some(byte) = self.peek_byte() else {
            return Err(self.set_error(self.bytes.len(), None, ErrorKind::UnexpectedEof));
        };
        match byte {
            b'"' => match self.basic_string() {
                Ok(data) => Ok(self.push_leaf(Kind::String, start, self.cursor, data)),
                Err(e) => Err(e),
            },
            b'\'' => match self.literal_string() {
                Ok(data) => Ok(self.push_leaf(Kind::String, start, self.cursor, data)),
                Err(e) => Err(e),
            },
            b't' => self.keyword("true", Kind::Bool),
            b'f' => self.keyword("false", Kind::Bool),
            b'i' => self.keyword("inf", Kind::Float),
            b'n' => self.keyword("nan", Kind::Float),
            b'[' => self.array(),
            b'{' => self.inline_table(),
            b',' | b']' | b'}' | b'=' | b'#' | b'\n' | b'\r' => Err(self.wanted("a value")),
            _ => self.number_or_datetime(),
        }
    }

    fn keyword(&mut self, literal: &'static str, kind: Kind) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let end = start + literal.len();
        if !scan::follows_literal(self.rest(), literal.as_bytes()) {
            let found_end = end.min(self.bytes.len());
            return Err(self.set_error(start, Some(found_end), ErrorKind::ExpectedLiteral(literal)));
        }
        self.cursor = end;
        Ok(self.push_token(kind, start, end))
    }

    fn number_or_datetime(&mut self) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let rest = self.rest();
        let scanned = if scan::looks_like_datetime(rest) {
            scan::scan_datetime(rest)
        } else {
            scan::scan_int_or_float(rest)
        };
        match scanned {
            Ok((kind, _, rest)) => {
                self.seek(rest);
                Ok(self.push_token(kind, start, self.cursor))
            }
            Err(e) => Err(self.scan_failed(e)),
        }
    }

    // -- arrays -------------------------------------------------------------

    fn array(&mut self) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let array = self.builder.push(Node::open(Kind::Array));
        self.cursor += 1;

        let mut last = Reference::INVALID;
        let mut seen_value = false;
        // Whether `last` is a value or comma on the line being scanned, so
        // trailing whitespace and comments belong to it.
        let mut trailing = false;

        loop {
            let ws = match self.array_trivia(array, &mut last, trailing) {
                Ok(ws) => ws,
                Err(e) => return Err(e),
            };
            match self.peek_byte() {
                None => {
                    return Err(self.wanted("a right bracket"));
                }
                Some(b']') => {
                    self.close_array(array, &mut last, ws);
                    break;
                }
                Some(b',') if !seen_value => {
                    return Err(self.set_error(self.cursor, None, ErrorKind::LeadingComma));
                }
                Some(_) => {}
            }

            let value = match self.value() {
                Ok(value) => value,
                Err(e) => return Err(e),
            };
            self.set_before(value, ws);
            last = self.builder.append(array, last, value);
            seen_value = true;

            let ws = match self.array_trivia(array, &mut last, true) {
                Ok(ws) => ws,
                Err(e) => return Err(e),
            };
            match self.peek_byte() {
                None => {
                    return Err(self.wanted("a right bracket"));
                }
                Some(b']') => {
                    self.close_array(array, &mut last, ws);
                    break;
                }
                Some(b',') => {
                    let comma = self.cursor;
                    self.cursor += 1;
                    if self.lossless {
                        let symbol = self.push_token(Kind::Symbol, comma, comma + 1);
                        self.set_before(symbol, ws);
                        last = self.builder.append(array, last, symbol);
                    }
                    trailing = true;
                }
                Some(_) => {
                    return Err(self.wanted("a comma or right bracket"));
                }
            }
        }

        self.close(array, start);
        Ok(array)
    }

    fn close_array(&mut self, array: Reference, last: &mut Reference, ws: &'a [u8]) {
        if self.lossless && !ws.is_empty() {
            let ws_start = self.cursor - ws.len();
            let node = self.push_token(Kind::WhiteSpace, ws_start, self.cursor);
            *last = self.builder.append(array, *last, node);
        }
        self.cursor += 1;
    }

    /// Skip whitespace, comments and newlines between array elements.
    ///
    /// Returns the whitespace in front of the next token. In lossless mode,
    /// whitespace and a comment trailing `last` on its line decorate it, a
    /// comment on a line of its own becomes a `Comment` node, and every line
    /// terminator becomes a `WhiteSpace` node.
    fn array_trivia(
        &mut self,
        array: Reference,
        last: &mut Reference,
        mut trailing: bool,
    ) -> Result<&'a [u8], ParseError> {
        loop {
            let ws_start = self.cursor;
            let ws = self.eat_whitespace();
            let comment = if self.peek_byte() == Some(b'#') {
                match self.eat_comment() {
                    Ok(span) => Some(span),
                    Err(e) => return Err(e),
                }
            } else {
                None
            };

            if !matches!(self.peek_byte(), Some(b'\n' | b'\r')) {
                return Ok(ws);
            }
            let line_end = self.cursor;
            let newline = match self.eat_line_terminator() {
                Ok(span) => span,
                Err(e) => return Err(e),
            };
            if !self.lossless {
                continue;
            }

            let comment_bytes = match comment {
                Some(span) => span.slice(self.bytes),
                None => &[],
            };
            let newline_start = if trailing {
                self.set_after(*last, ws);
                self.set_comment(*last, comment_bytes);
                newline.start as usize
            } else if let Some(span) = comment {
                let node = self.push_token(Kind::Comment, span.start as usize, span.end as usize);
                self.set_before(node, ws);
                *last = self.builder.append(array, *last, node);
                newline.start as usize
            } else {
                // A blank line: indentation and terminator in one node.
                debug_assert_eq!(line_end, ws_start + ws.len());
                ws_start
            };
            let node = self.push_token(Kind::WhiteSpace, newline_start, newline.end as usize);
            *last = self.builder.append(array, *last, node);
            trailing = false;
        }
    }

    // -- inline tables ------------------------------------------------------

    fn inline_table(&mut self) -> Result<Reference, ParseError> {
        let start = self.cursor;
        let table = self.builder.push(Node::open(Kind::InlineTable));
        self.cursor += 1;

        let mut last = Reference::INVALID;
        let mut ws = self.eat_whitespace();
        if self.peek_byte() != Some(b'}') {
            loop {
                let kv = match self.key_value() {
                    Ok(kv) => kv,
                    Err(e) => return Err(e),
                };
                self.set_before(kv, ws);
                last = self.builder.append(table, last, kv);

                ws = self.eat_whitespace();
                match self.peek_byte() {
                    Some(b'}') => break,
                    Some(b',') => {
                        let comma = self.cursor;
                        self.cursor += 1;
                        let ws2 = self.eat_whitespace();
                        if self.lossless {
                            let symbol = self.push_token(Kind::Symbol, comma, comma + 1);
                            self.set_before(symbol, ws);
                            self.set_after(symbol, ws2);
                            last = self.builder.append(table, last, symbol);
                        }
                        ws = &[];
                    }
                    None => return Err(self.wanted("a right brace")),
                    Some(_) => return Err(self.wanted("a comma or right brace")),
                }
            }
        }

        if self.lossless && !ws.is_empty() {
            let node = self.push_token(Kind::WhiteSpace, self.cursor - ws.len(), self.cursor);
            self.builder.append(table, last, node);
        }
        self.cursor += 1;
        self.close(table, start);
        Ok(table)
    }
}

/// Parse every expression of `input` without keeping any of them, returning
/// how many there were.
///
/// ```
/// assert_eq!(toml_cst::check("a = 1\n# note\nb = [1, 2]\n"), Ok(2));
/// assert!(toml_cst::check("a = ").is_err());
/// ```
pub fn check<S: AsRef<[u8]> + ?Sized>(input: &S) -> Result<usize, Error> {
    let arena = Arena::new();
    let mut parser = Parser::new(&arena);
    parser.reset(input);
    let mut count = 0;
    while parser.next_expression().is_some() {
        count += 1;
    }
    match parser.finish() {
        Ok(()) => Ok(count),
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bytes taken by the opening and closing delimiters of a string token,
/// counting a newline directly after a multiline opener as part of it.
fn delimiters(token: &[u8], multiline: bool) -> (usize, usize) {
    if multiline {
        (3 + scan::newline_len(&token[3..token.len() - 3]), 3)
    } else {
        (1, 1)
    }
}

fn byte_describe(b: u8) -> &'static str {
    match b {
        b'\n' => "a newline",
        b' ' | b'\t' => "whitespace",
        b'=' => "an equals",
        b'.' => "a period",
        b',' => "a comma",
        b':' => "a colon",
        b'+' => "a plus",
        b'{' => "a left brace",
        b'}' => "a right brace",
        b'[' => "a left bracket",
        b']' => "a right bracket",
        b'\'' | b'"' => "a string",
        _ if is_keylike_byte(b) => "an identifier",
        _ => "a character",
    }
}

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;
