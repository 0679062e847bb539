//! Scalar expressions: operators, literals, calls, and the select-list
//! `DerivedColumn` wrapper built on top of them.
//!
//! Parsing follows the grammar's explicit precedence ladder rather than a
//! generic Pratt table, since `NOT` and comparison don't chain the way
//! `+`/`*` do (`a = b = c` isn't a legal expression here).

use crate::ast::Ident;
use crate::keywords::{Keyword, RESERVED_FOR_ALIAS};
use crate::parser::{AstParseable, Parser};
use crate::tokens::Token;
use tableql_error::{Error, Result};

/// The five aggregate functions this grammar knows about. Anything else
/// spelled like a call (`f(x)`) is an ordinary [`Expr::FunctionCall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SetFunctionName {
    Count,
    Sum,
    Avg,
    Min,
    Max,
}

impl SetFunctionName {
    fn from_name(upper: &str) -> Option<Self> {
        Some(match upper {
            "COUNT" => SetFunctionName::Count,
            "SUM" => SetFunctionName::Sum,
            "AVG" => SetFunctionName::Avg,
            "MIN" => SetFunctionName::Min,
            "MAX" => SetFunctionName::Max,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SetFunctionName::Count => "COUNT",
            SetFunctionName::Sum => "SUM",
            SetFunctionName::Avg => "AVG",
            SetFunctionName::Min => "MIN",
            SetFunctionName::Max => "MAX",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaseWhen {
    pub condition: Expr,
    pub result: Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Expr {
    ColumnReference(Vec<Ident>),
    Integer(String),
    Float(String),
    /// The literal's exact source text, quotes included.
    String(String),
    Bool(bool),
    Null,
    BinaryExpression {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    UnaryExpression {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    FunctionCall {
        name: Ident,
        arguments: Vec<Expr>,
    },
    /// `argument` is `Expr::Asterisk` only for `COUNT(*)`.
    GeneralSetFunction {
        name: SetFunctionName,
        argument: Box<Expr>,
    },
    /// Legal as the entire select list, or as the sole argument to `COUNT`.
    Asterisk,
    CaseExpression {
        cases: Vec<CaseWhen>,
        else_: Option<Box<Expr>>,
    },
    Cast {
        value: Box<Expr>,
        type_name: Ident,
    },
}

/// A select-list entry: a value expression with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DerivedColumn {
    pub value: Expr,
    pub alias: Option<Ident>,
}

impl AstParseable for DerivedColumn {
    fn parse(parser: &mut Parser) -> Result<Self> {
        let value = Expr::parse(parser)?;
        let alias = parser.parse_alias(RESERVED_FOR_ALIAS)?;
        Ok(DerivedColumn { value, alias })
    }
}

impl AstParseable for Expr {
    fn parse(parser: &mut Parser) -> Result<Self> {
        parse_or(parser)
    }
}

fn parse_or(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_and(parser)?;
    while parser.parse_keyword(Keyword::Or) {
        let right = parse_and(parser)?;
        left = Expr::BinaryExpression {
            op: BinaryOp::Or,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_and(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_not(parser)?;
    while parser.parse_keyword(Keyword::And) {
        let right = parse_not(parser)?;
        left = Expr::BinaryExpression {
            op: BinaryOp::And,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_not(parser: &mut Parser) -> Result<Expr> {
    if parser.parse_keyword(Keyword::Not) {
        let operand = parse_not(parser)?;
        Ok(Expr::UnaryExpression {
            op: UnaryOp::Not,
            operand: Box::new(operand),
        })
    } else {
        parse_comparison(parser)
    }
}

fn comparison_op(token: &Token) -> Option<BinaryOp> {
    Some(match token {
        Token::Eq => BinaryOp::Eq,
        Token::Neq => BinaryOp::Ne,
        Token::Lt => BinaryOp::Lt,
        Token::LtEq => BinaryOp::Le,
        Token::Gt => BinaryOp::Gt,
        Token::GtEq => BinaryOp::Ge,
        _ => return None,
    })
}

fn parse_comparison(parser: &mut Parser) -> Result<Expr> {
    let left = parse_additive(parser)?;
    let op = match parser.peek().and_then(comparison_op) {
        Some(op) => op,
        None => return Ok(left),
    };
    parser.next();
    let right = parse_additive(parser)?;
    Ok(Expr::BinaryExpression {
        op,
        left: Box::new(left),
        right: Box::new(right),
    })
}

fn parse_additive(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_multiplicative(parser)?;
    loop {
        let op = match parser.peek() {
            Some(Token::Plus) => BinaryOp::Add,
            Some(Token::Minus) => BinaryOp::Sub,
            _ => break,
        };
        parser.next();
        let right = parse_multiplicative(parser)?;
        left = Expr::BinaryExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_multiplicative(parser: &mut Parser) -> Result<Expr> {
    let mut left = parse_unary(parser)?;
    loop {
        let op = match parser.peek() {
            Some(Token::Star) => BinaryOp::Mul,
            Some(Token::Slash) => BinaryOp::Div,
            Some(Token::Percent) => BinaryOp::Mod,
            _ => break,
        };
        parser.next();
        let right = parse_unary(parser)?;
        left = Expr::BinaryExpression {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
    }
    Ok(left)
}

fn parse_unary(parser: &mut Parser) -> Result<Expr> {
    let op = match parser.peek() {
        Some(Token::Plus) => Some(UnaryOp::Pos),
        Some(Token::Minus) => Some(UnaryOp::Neg),
        _ => None,
    };
    match op {
        Some(op) => {
            parser.next();
            let operand = parse_unary(parser)?;
            Ok(Expr::UnaryExpression {
                op,
                operand: Box::new(operand),
            })
        }
        None => parse_primary(parser),
    }
}

fn parse_primary(parser: &mut Parser) -> Result<Expr> {
    match parser.peek().cloned() {
        Some(Token::LeftParen) => {
            parser.next();
            // Parenthesization is value-preserving: no `Nested` wrapper.
            let inner = Expr::parse(parser)?;
            parser.expect_token(Token::RightParen)?;
            Ok(inner)
        }
        Some(Token::Number { text, is_float }) => {
            parser.next();
            Ok(if is_float {
                Expr::Float(text)
            } else {
                Expr::Integer(text)
            })
        }
        Some(Token::SingleQuotedString(text)) => {
            parser.next();
            Ok(Expr::String(text))
        }
        Some(Token::Star) => {
            parser.next();
            Ok(Expr::Asterisk)
        }
        Some(Token::Word(w)) => match w.keyword {
            Some(Keyword::True) => {
                parser.next();
                Ok(Expr::Bool(true))
            }
            Some(Keyword::False) => {
                parser.next();
                Ok(Expr::Bool(false))
            }
            Some(Keyword::Null) => {
                parser.next();
                Ok(Expr::Null)
            }
            Some(Keyword::Case) => parse_case(parser),
            Some(Keyword::Cast) => parse_cast(parser),
            // `NOT` only ever starts an expression via `parse_not`; reached
            // here it's in primary position (e.g. the right side of
            // `a = NOT b`), which isn't a legal expression start.
            Some(kw) => Err(Error::parse(
                parser.position(),
                "an expression".to_string(),
                format!("keyword {}", kw.as_str()),
            )),
            _ => parse_ident_led(parser),
        },
        other => Err(Error::parse(
            parser.position(),
            "an expression".to_string(),
            other
                .map(|t| format!("{t:?}"))
                .unwrap_or_else(|| "end of input".to_string()),
        )),
    }
}

/// Parses whatever starts with a plain identifier: a dotted column
/// reference, a function call, or an aggregate (`COUNT`, `SUM`, ...).
fn parse_ident_led(parser: &mut Parser) -> Result<Expr> {
    let first = Ident::parse(parser)?;

    if parser.peek() == Some(&Token::LeftParen) {
        return parse_call(parser, first);
    }

    let mut parts = vec![first];
    while parser.consume_token(&Token::Period) {
        parts.push(Ident::parse(parser)?);
    }
    if parts.len() > 3 {
        return Err(Error::parse(
            parser.position(),
            "at most three dotted name parts".to_string(),
            format!("{} parts", parts.len()),
        ));
    }
    Ok(Expr::ColumnReference(parts))
}

fn parse_call(parser: &mut Parser, name: Ident) -> Result<Expr> {
    if let Some(set_fn) = SetFunctionName::from_name(&name.value.to_ascii_uppercase()) {
        parser.expect_token(Token::LeftParen)?;
        let argument = if parser.consume_token(&Token::Star) {
            Expr::Asterisk
        } else {
            Expr::parse(parser)?
        };
        parser.expect_token(Token::RightParen)?;
        return Ok(Expr::GeneralSetFunction {
            name: set_fn,
            argument: Box::new(argument),
        });
    }

    parser.expect_token(Token::LeftParen)?;
    let arguments = if parser.peek() == Some(&Token::RightParen) {
        Vec::new()
    } else {
        parser.parse_comma_separated()?
    };
    parser.expect_token(Token::RightParen)?;
    Ok(Expr::FunctionCall { name, arguments })
}

fn parse_case(parser: &mut Parser) -> Result<Expr> {
    parser.expect_keyword(Keyword::Case)?;
    let mut cases = Vec::new();
    while parser.parse_keyword(Keyword::When) {
        let condition = Expr::parse(parser)?;
        parser.expect_keyword(Keyword::Then)?;
        let result = Expr::parse(parser)?;
        cases.push(CaseWhen { condition, result });
    }
    if cases.is_empty() {
        return Err(Error::parse(
            parser.position(),
            "WHEN".to_string(),
            "something else".to_string(),
        ));
    }
    let else_ = if parser.parse_keyword(Keyword::Else) {
        Some(Box::new(Expr::parse(parser)?))
    } else {
        None
    };
    parser.expect_keyword(Keyword::End)?;
    Ok(Expr::CaseExpression { cases, else_ })
}

fn parse_cast(parser: &mut Parser) -> Result<Expr> {
    parser.expect_keyword(Keyword::Cast)?;
    parser.expect_token(Token::LeftParen)?;
    let value = Expr::parse(parser)?;
    parser.expect_keyword(Keyword::As)?;
    let type_name = Ident::parse(parser)?;
    parser.expect_token(Token::RightParen)?;
    Ok(Expr::Cast {
        value: Box::new(value),
        type_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::testutil::parse_ast;
    use pretty_assertions::assert_eq;

    fn ident(s: &str) -> Ident {
        Ident::new(s)
    }

    #[test]
    fn column_reference() {
        let e: Expr = parse_ast("t.a");
        assert_eq!(e, Expr::ColumnReference(vec![ident("t"), ident("a")]));
    }

    #[test]
    fn arithmetic_precedence() {
        // `1 + 2 * 3` should bind as `1 + (2 * 3)`.
        let e: Expr = parse_ast("1 + 2 * 3");
        assert_eq!(
            e,
            Expr::BinaryExpression {
                op: BinaryOp::Add,
                left: Box::new(Expr::Integer("1".to_string())),
                right: Box::new(Expr::BinaryExpression {
                    op: BinaryOp::Mul,
                    left: Box::new(Expr::Integer("2".to_string())),
                    right: Box::new(Expr::Integer("3".to_string())),
                }),
            }
        );
    }

    #[test]
    fn parens_collapse() {
        let with_parens: Expr = parse_ast("(a)");
        let without: Expr = parse_ast("a");
        assert_eq!(with_parens, without);
    }

    #[test]
    fn count_star() {
        let e: Expr = parse_ast("COUNT(*)");
        assert_eq!(
            e,
            Expr::GeneralSetFunction {
                name: SetFunctionName::Count,
                argument: Box::new(Expr::Asterisk),
            }
        );
    }

    #[test]
    fn nested_aggregate_parses_fine_syntactically() {
        // The parser does no semantic checking; `SUM(SUM(a))` is rejected
        // later, by the splitter.
        let e: Expr = parse_ast("SUM(SUM(a))");
        assert_eq!(
            e,
            Expr::GeneralSetFunction {
                name: SetFunctionName::Sum,
                argument: Box::new(Expr::GeneralSetFunction {
                    name: SetFunctionName::Sum,
                    argument: Box::new(Expr::ColumnReference(vec![ident("a")])),
                }),
            }
        );
    }

    #[test]
    fn ordinary_function_call() {
        let e: Expr = parse_ast("f(a, b)");
        assert_eq!(
            e,
            Expr::FunctionCall {
                name: ident("f"),
                arguments: vec![
                    Expr::ColumnReference(vec![ident("a")]),
                    Expr::ColumnReference(vec![ident("b")]),
                ],
            }
        );
    }

    #[test]
    fn not_in_primary_position_is_an_error() {
        // `NOT` only starts an expression through `parse_not`; as the right
        // operand of a comparison it's reached in primary position instead,
        // which should be a parse error rather than a column named `NOT`.
        use crate::tokens::Tokenizer;
        let toks = Tokenizer::new("a = NOT b").tokenize().expect("tokenize");
        let mut parser = Parser::new(toks);
        let err = Expr::parse(&mut parser).unwrap_err();
        assert!(matches!(err, tableql_error::Error::Parse { .. }));
    }

    #[test]
    fn case_expression() {
        let e: Expr = parse_ast("CASE WHEN a THEN 1 ELSE 2 END");
        assert_eq!(
            e,
            Expr::CaseExpression {
                cases: vec![CaseWhen {
                    condition: Expr::ColumnReference(vec![ident("a")]),
                    result: Expr::Integer("1".to_string()),
                }],
                else_: Some(Box::new(Expr::Integer("2".to_string()))),
            }
        );
    }
}
