use std::fmt;

#[cfg(test)]
#[path = "./kind_tests.rs"]
mod tests;

/// The category of a syntax tree node.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    /// Placeholder for a node that was never classified.
    Invalid,
    /// A `#` comment, without its line terminator.
    Comment,
    /// One segment of a (possibly dotted) key.
    Key,
    /// Punctuation kept in lossless mode: `=`, `.` and `,`.
    Symbol,
    /// Insignificant whitespace and line breaks kept in lossless mode.
    WhiteSpace,

    /// A `[table]` header.
    Table,
    /// An `[[array.table]]` header.
    ArrayTable,
    /// A `key = value` binding.
    KeyValue,

    /// An `[ ... ]` array value.
    Array,
    /// A `{ ... }` inline table value.
    InlineTable,

    String,
    Bool,
    Float,
    Integer,
    LocalDate,
    LocalDateTime,
    DateTime,
    Time,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Invalid => "Invalid",
            Kind::Comment => "Comment",
            Kind::Key => "Key",
            Kind::Symbol => "Symbol",
            Kind::WhiteSpace => "WhiteSpace",
            Kind::Table => "Table",
            Kind::ArrayTable => "ArrayTable",
            Kind::KeyValue => "KeyValue",
            Kind::Array => "Array",
            Kind::InlineTable => "InlineTable",
            Kind::String => "String",
            Kind::Bool => "Bool",
            Kind::Float => "Float",
            Kind::Integer => "Integer",
            Kind::LocalDate => "LocalDate",
            Kind::LocalDateTime => "LocalDateTime",
            Kind::DateTime => "DateTime",
            Kind::Time => "Time",
        }
    }

    /// Scalars are leaves whose `data` carries the value's bytes.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Kind::String
                | Kind::Bool
                | Kind::Float
                | Kind::Integer
                | Kind::LocalDate
                | Kind::LocalDateTime
                | Kind::DateTime
                | Kind::Time
        )
    }

    pub fn is_datetime(self) -> bool {
        matches!(
            self,
            Kind::LocalDate | Kind::LocalDateTime | Kind::DateTime | Kind::Time
        )
    }

    /// Kinds that can be produced by the value grammar.
    pub fn is_value(self) -> bool {
        self.is_scalar() || matches!(self, Kind::Array | Kind::InlineTable)
    }

    /// Comments, whitespace and punctuation only exist in lossless mode.
    pub fn is_trivia(self) -> bool {
        matches!(self, Kind::Comment | Kind::WhiteSpace | Kind::Symbol)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
