//! The fixed keyword table for the supported SQL subset.
//!
//! Keywords are matched case-insensitively against the text of a `Word`
//! token; everything not in [`Keyword::from_word`] is treated as a plain
//! identifier.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    As,
    And,
    Or,
    Not,
    All,
    Distinct,
    Asc,
    Desc,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Join,
    Cross,
    On,
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    Null,
    True,
    False,
    Create,
    Table,
    Drop,
    Copy,
    Show,
    To,
    Options,
}

/// Identifiers that may not be used as an unaliased table/column alias
/// without an explicit `AS`, because doing so would make the grammar
/// ambiguous (e.g. `SELECT a ORDER` could otherwise be read as aliasing `a`
/// to `ORDER` instead of starting an `ORDER BY` clause).
pub const RESERVED_FOR_ALIAS: &[Keyword] = &[
    Keyword::From,
    Keyword::Where,
    Keyword::Group,
    Keyword::Having,
    Keyword::Order,
    Keyword::Limit,
    Keyword::On,
    Keyword::Join,
    Keyword::Inner,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
    Keyword::Cross,
    Keyword::And,
    Keyword::Or,
    Keyword::As,
];

impl Keyword {
    /// Classify a word's uppercased text as a keyword, if it is one.
    pub fn from_word(upper: &str) -> Option<Keyword> {
        Some(match upper {
            "SELECT" => Keyword::Select,
            "FROM" => Keyword::From,
            "WHERE" => Keyword::Where,
            "GROUP" => Keyword::Group,
            "BY" => Keyword::By,
            "HAVING" => Keyword::Having,
            "ORDER" => Keyword::Order,
            "LIMIT" => Keyword::Limit,
            "OFFSET" => Keyword::Offset,
            "AS" => Keyword::As,
            "AND" => Keyword::And,
            "OR" => Keyword::Or,
            "NOT" => Keyword::Not,
            "ALL" => Keyword::All,
            "DISTINCT" => Keyword::Distinct,
            "ASC" => Keyword::Asc,
            "DESC" => Keyword::Desc,
            "INNER" => Keyword::Inner,
            "LEFT" => Keyword::Left,
            "RIGHT" => Keyword::Right,
            "FULL" => Keyword::Full,
            "OUTER" => Keyword::Outer,
            "JOIN" => Keyword::Join,
            "CROSS" => Keyword::Cross,
            "ON" => Keyword::On,
            "CASE" => Keyword::Case,
            "WHEN" => Keyword::When,
            "THEN" => Keyword::Then,
            "ELSE" => Keyword::Else,
            "END" => Keyword::End,
            "CAST" => Keyword::Cast,
            "NULL" => Keyword::Null,
            "TRUE" => Keyword::True,
            "FALSE" => Keyword::False,
            "CREATE" => Keyword::Create,
            "TABLE" => Keyword::Table,
            "DROP" => Keyword::Drop,
            "COPY" => Keyword::Copy,
            "SHOW" => Keyword::Show,
            "TO" => Keyword::To,
            "OPTIONS" => Keyword::Options,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Select => "SELECT",
            Keyword::From => "FROM",
            Keyword::Where => "WHERE",
            Keyword::Group => "GROUP",
            Keyword::By => "BY",
            Keyword::Having => "HAVING",
            Keyword::Order => "ORDER",
            Keyword::Limit => "LIMIT",
            Keyword::Offset => "OFFSET",
            Keyword::As => "AS",
            Keyword::And => "AND",
            Keyword::Or => "OR",
            Keyword::Not => "NOT",
            Keyword::All => "ALL",
            Keyword::Distinct => "DISTINCT",
            Keyword::Asc => "ASC",
            Keyword::Desc => "DESC",
            Keyword::Inner => "INNER",
            Keyword::Left => "LEFT",
            Keyword::Right => "RIGHT",
            Keyword::Full => "FULL",
            Keyword::Outer => "OUTER",
            Keyword::Join => "JOIN",
            Keyword::Cross => "CROSS",
            Keyword::On => "ON",
            Keyword::Case => "CASE",
            Keyword::When => "WHEN",
            Keyword::Then => "THEN",
            Keyword::Else => "ELSE",
            Keyword::End => "END",
            Keyword::Cast => "CAST",
            Keyword::Null => "NULL",
            Keyword::True => "TRUE",
            Keyword::False => "FALSE",
            Keyword::Create => "CREATE",
            Keyword::Table => "TABLE",
            Keyword::Drop => "DROP",
            Keyword::Copy => "COPY",
            Keyword::Show => "SHOW",
            Keyword::To => "TO",
            Keyword::Options => "OPTIONS",
        }
    }
}
