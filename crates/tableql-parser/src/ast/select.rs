//! The `SELECT` statement tree: select list, `FROM` (including joins),
//! `WHERE`/`GROUP BY`/`HAVING`, `ORDER BY`, `LIMIT`/`OFFSET`, and the set
//! quantifier.

use crate::ast::expr::{DerivedColumn, Expr};
use crate::ast::{Ident, ObjectReference};
use crate::keywords::{Keyword, RESERVED_FOR_ALIAS};
use crate::parser::{AstParseable, Parser};
use crate::tokens::Token;
use tableql_error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SetQuantifier {
    All,
    Distinct,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SelectList {
    Asterisk,
    Columns(Vec<DerivedColumn>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderByExpr {
    pub expr: Expr,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LimitClause {
    pub offset: u64,
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum JoinHow {
    Inner,
    Left,
    Right,
    Full,
    LeftOuter,
    RightOuter,
    FullOuter,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Join {
    Join {
        how: JoinHow,
        table: Box<TableRef>,
        on: Expr,
    },
    CrossJoin {
        table: Box<TableRef>,
    },
}

/// A table-shaped node in a `FROM` list: a named table, a parenthesized
/// subquery, or a chain of joins folded onto a left-hand table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TableRef {
    TableName {
        table: ObjectReference,
        alias: Option<Ident>,
    },
    Subquery {
        query: Box<Select>,
        alias: Option<Ident>,
    },
    JoinedTable {
        left: Box<TableRef>,
        joins: Vec<Join>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Select {
    pub set_quantifier: SetQuantifier,
    pub select_list: SelectList,
    pub from_clause: Vec<TableRef>,
    pub where_clause: Option<Expr>,
    pub group_by_clause: Option<Vec<Expr>>,
    pub having_clause: Option<Expr>,
    pub order_by_clause: Vec<OrderByExpr>,
    pub limit_clause: Option<LimitClause>,
}

impl AstParseable for Select {
    fn parse(parser: &mut Parser) -> Result<Self> {
        parser.expect_keyword(Keyword::Select)?;

        let set_quantifier = match parser.parse_one_of_keywords(&[Keyword::All, Keyword::Distinct]) {
            Some(Keyword::Distinct) => SetQuantifier::Distinct,
            _ => SetQuantifier::All,
        };

        let select_list = if parser.consume_token(&Token::Star) {
            SelectList::Asterisk
        } else {
            SelectList::Columns(parser.parse_comma_separated()?)
        };

        parser.expect_keyword(Keyword::From)?;
        let from_clause = parser.parse_comma_separated::<TableRef>()?;

        let where_clause = if parser.parse_keyword(Keyword::Where) {
            Some(Expr::parse(parser)?)
        } else {
            None
        };

        let group_by_clause = if parser.parse_keyword_sequence(&[Keyword::Group, Keyword::By]) {
            Some(parser.parse_comma_separated()?)
        } else {
            None
        };

        let having_clause = if parser.parse_keyword(Keyword::Having) {
            Some(Expr::parse(parser)?)
        } else {
            None
        };

        let order_by_clause = if parser.parse_keyword_sequence(&[Keyword::Order, Keyword::By]) {
            parser.parse_comma_separated::<OrderByExpr>()?
        } else {
            Vec::new()
        };

        let limit_clause = if parser.parse_keyword(Keyword::Limit) {
            Some(parse_limit_clause(parser)?)
        } else {
            None
        };

        Ok(Select {
            set_quantifier,
            select_list,
            from_clause,
            where_clause,
            group_by_clause,
            having_clause,
            order_by_clause,
            limit_clause,
        })
    }
}

fn parse_uint(parser: &mut Parser) -> Result<u64> {
    match parser.peek().cloned() {
        Some(Token::Number { text, is_float: false }) => {
            parser.next();
            text.parse::<u64>().map_err(|_| {
                Error::parse(parser.position(), "an integer literal".to_string(), text)
            })
        }
        other => Err(Error::parse(
            parser.position(),
            "an integer literal".to_string(),
            other
                .map(|t| format!("{t:?}"))
                .unwrap_or_else(|| "end of input".to_string()),
        )),
    }
}

/// `LIMIT n`, `LIMIT n OFFSET m`, and the MySQL-style `LIMIT offset, count`
/// all collapse to the same `(offset, limit)` pair.
fn parse_limit_clause(parser: &mut Parser) -> Result<LimitClause> {
    let first = parse_uint(parser)?;

    if parser.consume_token(&Token::Comma) {
        let second = parse_uint(parser)?;
        Ok(LimitClause {
            offset: first,
            limit: second,
        })
    } else if parser.parse_keyword(Keyword::Offset) {
        let offset = parse_uint(parser)?;
        Ok(LimitClause {
            offset,
            limit: first,
        })
    } else {
        Ok(LimitClause {
            offset: 0,
            limit: first,
        })
    }
}

impl AstParseable for OrderByExpr {
    fn parse(parser: &mut Parser) -> Result<Self> {
        let expr = Expr::parse(parser)?;
        let order = match parser.parse_one_of_keywords(&[Keyword::Asc, Keyword::Desc]) {
            Some(Keyword::Desc) => SortOrder::Desc,
            _ => SortOrder::Asc,
        };
        Ok(OrderByExpr { expr, order })
    }
}

const JOIN_QUALIFIERS: &[Keyword] = &[
    Keyword::Inner,
    Keyword::Left,
    Keyword::Right,
    Keyword::Full,
];

fn parse_join_how(parser: &mut Parser) -> JoinHow {
    match parser.parse_one_of_keywords(JOIN_QUALIFIERS) {
        Some(Keyword::Inner) => JoinHow::Inner,
        Some(Keyword::Left) => {
            if parser.parse_keyword(Keyword::Outer) {
                JoinHow::LeftOuter
            } else {
                JoinHow::Left
            }
        }
        Some(Keyword::Right) => {
            if parser.parse_keyword(Keyword::Outer) {
                JoinHow::RightOuter
            } else {
                JoinHow::Right
            }
        }
        Some(Keyword::Full) => {
            if parser.parse_keyword(Keyword::Outer) {
                JoinHow::FullOuter
            } else {
                JoinHow::Full
            }
        }
        _ => JoinHow::Inner,
    }
}

impl AstParseable for TableRef {
    fn parse(parser: &mut Parser) -> Result<Self> {
        let mut left = parse_table_factor(parser)?;

        let mut joins = Vec::new();
        loop {
            if parser.parse_keyword(Keyword::Cross) {
                parser.expect_keyword(Keyword::Join)?;
                let table = parse_table_factor(parser)?;
                joins.push(Join::CrossJoin {
                    table: Box::new(table),
                });
                continue;
            }

            let checkpoint = parser.checkpoint();
            let how = parse_join_how(parser);
            if parser.parse_keyword(Keyword::Join) {
                let table = parse_table_factor(parser)?;
                parser.expect_keyword(Keyword::On)?;
                let on = Expr::parse(parser)?;
                joins.push(Join::Join {
                    how,
                    table: Box::new(table),
                    on,
                });
                continue;
            }
            parser.restore(checkpoint);
            break;
        }

        if joins.is_empty() {
            Ok(left)
        } else {
            left = TableRef::JoinedTable {
                left: Box::new(left),
                joins,
            };
            Ok(left)
        }
    }
}

fn parse_table_factor(parser: &mut Parser) -> Result<TableRef> {
    if parser.consume_token(&Token::LeftParen) {
        let query = Select::parse(parser)?;
        parser.expect_token(Token::RightParen)?;
        let alias = parser.parse_alias(RESERVED_FOR_ALIAS)?;
        return Ok(TableRef::Subquery {
            query: Box::new(query),
            alias,
        });
    }

    let table = ObjectReference::parse(parser)?;
    let alias = parser.parse_alias(RESERVED_FOR_ALIAS)?;
    Ok(TableRef::TableName { table, alias })
}
