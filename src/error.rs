#![allow(clippy::question_mark)]
use crate::Span;
use std::fmt::{self, Debug, Display};

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

/// Error produced when the input cannot be parsed.
///
/// Parsing stops at the first error; there is no partial tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    /// The error kind
    pub kind: ErrorKind,
    /// The bytes of the input the error points at.
    pub span: Span,
    /// Zero-based line and column (in bytes) of `span.start`, when the
    /// error came out of the parser.
    pub line_info: Option<(usize, usize)>,
}

impl std::error::Error for Error {}

impl From<(ErrorKind, Span)> for Error {
    fn from((kind, span): (ErrorKind, Span)) -> Self {
        Self {
            kind,
            span,
            line_info: None,
        }
    }
}

/// The cause of a parse [`Error`].
#[derive(Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input ended while a value was expected.
    UnexpectedEof,

    /// The input is larger than the maximum supported size of 4GiB.
    FileTooLarge,

    /// A string was still open when the input ended.
    UnterminatedString,

    /// A character not allowed in a string was found.
    InvalidCharInString(char),

    /// A control character was found inside a comment.
    InvalidCharInComment(char),

    /// An unknown character followed a backslash.
    InvalidEscape(char),

    /// A `\u` or `\U` escape ran into the end of the string.
    ShortUnicodeEscape {
        /// Number of hex digits the escape requires.
        expected: u8,
        /// Number of characters that were left.
        found: u8,
    },

    /// A non-hex character appeared in a `\u` or `\U` escape.
    InvalidHexEscape(char),

    /// A `\u` or `\U` escape named something that is not a Unicode scalar
    /// value.
    InvalidEscapeValue(u32),

    /// An unexpected character was encountered, such as a `\r` that is
    /// not part of a `\r\n` pair.
    Unexpected(char),

    /// A number literal could not be scanned.
    InvalidNumber,

    /// A keyword started but did not match, e.g. `tru`.
    ExpectedLiteral(&'static str),

    /// An array started with a comma.
    LeadingComma,

    /// Multiline strings are not allowed as keys.
    MultilineStringKey,

    /// Wanted one sort of token, but found another.
    Wanted {
        /// Expected token type.
        expected: &'static str,
        /// Actually found token type.
        found: &'static str,
    },
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UnexpectedEof => "unexpected-eof",
            Self::FileTooLarge => "file-too-large",
            Self::UnterminatedString => "unterminated-string",
            Self::InvalidCharInString(..) => "invalid-char-in-string",
            Self::InvalidCharInComment(..) => "invalid-char-in-comment",
            Self::InvalidEscape(..) => "invalid-escape",
            Self::ShortUnicodeEscape { .. } => "short-unicode-escape",
            Self::InvalidHexEscape(..) => "invalid-hex-escape",
            Self::InvalidEscapeValue(..) => "invalid-escape-value",
            Self::Unexpected(..) => "unexpected",
            Self::InvalidNumber => "invalid-number",
            Self::ExpectedLiteral(..) => "expected-literal",
            Self::LeadingComma => "leading-comma",
            Self::MultilineStringKey => "multiline-string-key",
            Self::Wanted { .. } => "wanted",
        };
        f.write_str(text)
    }
}

impl Debug for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// Shows whitespace and control characters as escapes, e.g. `\t` or `\u{0}`.
struct Escape(char);

impl fmt::Display for Escape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        if self.0.is_whitespace() || self.0.is_control() {
            for esc in self.0.escape_default() {
                f.write_char(esc)?;
            }
            Ok(())
        } else {
            f.write_char(self.0)
        }
    }
}

macro_rules! rtry {
    ($($tt:tt)*) => {
        if let Err(err) = $($tt)* {
            return Err(err);
        }
    };
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedEof => f.write_str("unexpected eof encountered"),
            ErrorKind::FileTooLarge => f.write_str("file is too large (maximum 4GiB)"),
            ErrorKind::UnterminatedString => f.write_str("unterminated string"),
            ErrorKind::InvalidCharInString(c) => {
                rtry!(f.write_str("invalid character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidCharInComment(c) => {
                rtry!(f.write_str("invalid character in comment: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidEscape(c) => {
                rtry!(f.write_str("invalid escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::ShortUnicodeEscape { expected, found } => {
                write!(f, "unicode escape needs {expected} hex digits, found {found}")
            }
            ErrorKind::InvalidHexEscape(c) => {
                rtry!(f.write_str("invalid hex escape character in string: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidEscapeValue(c) => {
                write!(f, "invalid escape value: `{c:#X}` is not a unicode scalar value")
            }
            ErrorKind::Unexpected(c) => {
                rtry!(f.write_str("unexpected character found: `"));
                rtry!(Escape(*c).fmt(f));
                f.write_str("`")
            }
            ErrorKind::InvalidNumber => f.write_str("incomplete number"),
            ErrorKind::ExpectedLiteral(literal) => {
                rtry!(f.write_str("expected '"));
                rtry!(f.write_str(literal));
                f.write_str("'")
            }
            ErrorKind::LeadingComma => f.write_str("array cannot start with a comma"),
            ErrorKind::MultilineStringKey => {
                f.write_str("multiline strings are not allowed for key")
            }
            ErrorKind::Wanted { expected, found } => {
                rtry!(f.write_str("expected "));
                rtry!(f.write_str(expected));
                rtry!(f.write_str(", found "));
                f.write_str(found)
            }
        }
    }
}

#[cfg(feature = "reporting")]
#[cfg_attr(docsrs, doc(cfg(feature = "reporting")))]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`]
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        let diag = Diagnostic::error()
            .with_code(self.kind.to_string())
            .with_message(self.to_string());
        let span: std::ops::Range<usize> = self.span.into();

        let label = match &self.kind {
            ErrorKind::UnterminatedString => "eof reached before string terminator",
            ErrorKind::InvalidCharInString(_) => "invalid character in string",
            ErrorKind::InvalidCharInComment(_) => "invalid character in comment",
            ErrorKind::InvalidEscape(_) => "invalid escape character",
            ErrorKind::ShortUnicodeEscape { .. } => "incomplete unicode escape",
            ErrorKind::InvalidHexEscape(_) => "invalid hex digit",
            ErrorKind::InvalidEscapeValue(_) => "invalid escape value",
            ErrorKind::Unexpected(_) => "unexpected character",
            ErrorKind::InvalidNumber => "unable to scan number",
            ErrorKind::ExpectedLiteral(_) => "unknown keyword",
            ErrorKind::LeadingComma => "leading comma",
            ErrorKind::MultilineStringKey => "multiline keys are not allowed",
            ErrorKind::Wanted { expected, .. } => {
                return diag.with_labels(vec![
                    Label::primary(fid, span).with_message(format!("expected {expected}")),
                ]);
            }
            ErrorKind::UnexpectedEof | ErrorKind::FileTooLarge => {
                return diag.with_labels(vec![Label::primary(fid, span)]);
            }
        };
        diag.with_labels(vec![Label::primary(fid, span).with_message(label)])
    }
}
