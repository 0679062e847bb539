//! Shared error taxonomy for the SQL front-end and query-plan compiler.
//!
//! Every fallible entry point in `tableql-parser` and `tableql-compiler`
//! returns [`Result`]. There's no retry machinery anywhere in this crate
//! family: everything here is synchronous, in-memory, and either succeeds or
//! fails outright.

use std::fmt;

pub type Result<T> = std::result::Result<T, Error>;

/// A position into the original query text, measured in bytes from the
/// start of the string.
pub type Position = usize;

/// The full error taxonomy for parsing and compiling a query.
///
/// All variants are fatal to the current `parse`/`compile` call; none carry
/// retry semantics, since the core never performs I/O.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Error {
    /// Invalid syntax. Carries the byte position of the offending token plus
    /// what the parser was expecting and what it actually found there.
    Parse {
        position: Position,
        expected: String,
        found: String,
    },
    /// A `GeneralSetFunction` was found nested inside another one, e.g.
    /// `SUM(SUM(a))`.
    NestedAggregate { message: String },
    /// `SELECT *` was combined with a `GROUP BY` clause.
    AsteriskWithGroupBy,
    /// A `FROM` clause was empty in a context that requires a source table.
    EmptyFromClause,
    /// The select statement's set quantifier was neither `ALL` nor `DISTINCT`.
    UnknownSetQuantifier { found: String },
    /// A join AST node carried a join-kind shape the compiler doesn't
    /// recognize.
    UnknownJoinKind { found: String },
}

impl Error {
    pub fn parse(position: Position, expected: impl Into<String>, found: impl Into<String>) -> Self {
        Error::Parse {
            position,
            expected: expected.into(),
            found: found.into(),
        }
    }

    pub fn nested_aggregate(message: impl Into<String>) -> Self {
        Error::NestedAggregate {
            message: message.into(),
        }
    }

    pub fn unknown_set_quantifier(found: impl Into<String>) -> Self {
        Error::UnknownSetQuantifier { found: found.into() }
    }

    pub fn unknown_join_kind(found: impl Into<String>) -> Self {
        Error::UnknownJoinKind { found: found.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Parse {
                position,
                expected,
                found,
            } => write!(
                f,
                "parse error at byte {position}: expected {expected}, found {found}"
            ),
            Error::NestedAggregate { message } => write!(f, "nested aggregate: {message}"),
            Error::AsteriskWithGroupBy => {
                write!(f, "SELECT * cannot be combined with GROUP BY")
            }
            Error::EmptyFromClause => write!(f, "FROM clause must name at least one table"),
            Error::UnknownSetQuantifier { found } => {
                write!(f, "unknown set quantifier: {found}")
            }
            Error::UnknownJoinKind { found } => write!(f, "unknown join kind: {found}"),
        }
    }
}

impl std::error::Error for Error {}
