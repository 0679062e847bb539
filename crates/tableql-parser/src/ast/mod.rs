//! The parsed representation of a query: identifiers, expressions, and the
//! `SELECT` statement tree built out of them.

pub mod expr;
pub mod select;
pub mod statement;

pub use expr::{BinaryOp, CaseWhen, DerivedColumn, Expr, SetFunctionName, UnaryOp};
pub use select::{
    Join, JoinHow, LimitClause, OrderByExpr, Select, SelectList, SetQuantifier, SortOrder,
    TableRef,
};
pub use statement::{CopyOption, Statement};

use crate::parser::{AstParseable, Parser};
use crate::tokens::{Token, Word};
use tableql_error::{Error, Result};

/// A single unqualified name: a column, table, or alias.
///
/// Quoted identifiers (`"MixedCase"`) keep their exact text; unquoted ones
/// are stored as written, case preserved, since this grammar doesn't fold
/// identifier case (unlike keyword matching, which is case-insensitive).
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Ident {
    pub value: String,
}

impl Ident {
    pub fn new(value: impl Into<String>) -> Self {
        Ident { value: value.into() }
    }

    pub(crate) fn from_word(word: Word) -> Self {
        Ident { value: word.value }
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AstParseable for Ident {
    fn parse(parser: &mut Parser) -> Result<Self> {
        match parser.peek() {
            Some(Token::Word(w)) => {
                let word = w.clone();
                parser.next();
                Ok(Ident::from_word(word))
            }
            other => Err(Error::parse(
                parser.position(),
                "identifier".to_string(),
                other
                    .map(|t| format!("{t:?}"))
                    .unwrap_or_else(|| "end of input".to_string()),
            )),
        }
    }
}

/// A possibly-qualified column reference, e.g. `a`, `t.a`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObjectReference(pub Vec<Ident>);

impl std::fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<_> = self.0.iter().map(|i| i.value.clone()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl AstParseable for ObjectReference {
    fn parse(parser: &mut Parser) -> Result<Self> {
        let mut idents = vec![Ident::parse(parser)?];
        while parser.consume_token(&Token::Period) {
            idents.push(Ident::parse(parser)?);
        }
        Ok(ObjectReference(idents))
    }
}

#[cfg(test)]
pub(crate) mod testutil {
    use super::*;
    use crate::tokens::Tokenizer;

    pub fn parse_ast<T: AstParseable>(sql: &str) -> T {
        let toks = Tokenizer::new(sql).tokenize().expect("tokenize");
        let mut parser = Parser::new(toks);
        let node = T::parse(&mut parser).expect("parse");
        assert!(parser.at_end(), "leftover tokens after parsing {sql:?}");
        node
    }
}
