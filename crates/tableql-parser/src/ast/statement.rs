//! Top-level statements. Only `SelectStmt` is part of the core contract;
//! the rest exist so the parser can produce a typed AST for the DDL/COPY/SHOW
//! surface an external collaborator handles.

use crate::ast::select::Select;
use crate::ast::{Ident, ObjectReference};
use crate::keywords::Keyword;
use crate::parser::{AstParseable, Parser};
use crate::tokens::Token;
use tableql_error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CopyOption {
    pub name: Ident,
    pub value: crate::ast::expr::Expr,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Statement {
    SelectStmt(Select),
    CreateTableAs {
        name: ObjectReference,
        query: Box<Select>,
    },
    DropTable {
        names: Vec<ObjectReference>,
    },
    CopyFrom {
        name: ObjectReference,
        filename: crate::ast::expr::Expr,
        options: Vec<CopyOption>,
    },
    CopyTo {
        name: ObjectReference,
        filename: crate::ast::expr::Expr,
        options: Vec<CopyOption>,
    },
    Show {
        args: Vec<Ident>,
    },
}

impl AstParseable for Statement {
    fn parse(parser: &mut Parser) -> Result<Self> {
        match parser.peek().and_then(|t| match t {
            Token::Word(w) => w.keyword,
            _ => None,
        }) {
            Some(Keyword::Select) => Ok(Statement::SelectStmt(Select::parse(parser)?)),
            Some(Keyword::Create) => parse_create_table_as(parser),
            Some(Keyword::Drop) => parse_drop_table(parser),
            Some(Keyword::Copy) => parse_copy(parser),
            Some(Keyword::Show) => parse_show(parser),
            _ => Err(Error::parse(
                parser.position(),
                "a statement".to_string(),
                parser
                    .peek()
                    .map(|t| format!("{t:?}"))
                    .unwrap_or_else(|| "end of input".to_string()),
            )),
        }
    }
}

fn parse_create_table_as(parser: &mut Parser) -> Result<Statement> {
    parser.expect_keyword(Keyword::Create)?;
    parser.expect_keyword(Keyword::Table)?;
    let name = ObjectReference::parse(parser)?;
    parser.expect_keyword(Keyword::As)?;
    let query = Select::parse(parser)?;
    Ok(Statement::CreateTableAs {
        name,
        query: Box::new(query),
    })
}

fn parse_drop_table(parser: &mut Parser) -> Result<Statement> {
    parser.expect_keyword(Keyword::Drop)?;
    parser.expect_keyword(Keyword::Table)?;
    let names = parser.parse_comma_separated::<ObjectReference>()?;
    Ok(Statement::DropTable { names })
}

fn parse_copy_options(parser: &mut Parser) -> Result<Vec<CopyOption>> {
    if !parser.parse_keyword(Keyword::Options) {
        return Ok(Vec::new());
    }
    parser.expect_token(Token::LeftParen)?;
    let mut options = vec![parse_copy_option(parser)?];
    while parser.consume_token(&Token::Comma) {
        options.push(parse_copy_option(parser)?);
    }
    parser.expect_token(Token::RightParen)?;
    Ok(options)
}

fn parse_copy_option(parser: &mut Parser) -> Result<CopyOption> {
    let name = Ident::parse(parser)?;
    parser.expect_token(Token::Eq)?;
    let value = crate::ast::expr::Expr::parse(parser)?;
    Ok(CopyOption { name, value })
}

fn parse_copy(parser: &mut Parser) -> Result<Statement> {
    parser.expect_keyword(Keyword::Copy)?;
    let name = ObjectReference::parse(parser)?;

    if parser.parse_keyword(Keyword::From) {
        let filename = crate::ast::expr::Expr::parse(parser)?;
        let options = parse_copy_options(parser)?;
        Ok(Statement::CopyFrom {
            name,
            filename,
            options,
        })
    } else if parser.parse_keyword(Keyword::To) {
        let filename = crate::ast::expr::Expr::parse(parser)?;
        let options = parse_copy_options(parser)?;
        Ok(Statement::CopyTo {
            name,
            filename,
            options,
        })
    } else {
        Err(Error::parse(
            parser.position(),
            "FROM or TO".to_string(),
            parser
                .peek()
                .map(|t| format!("{t:?}"))
                .unwrap_or_else(|| "end of input".to_string()),
        ))
    }
}

fn parse_show(parser: &mut Parser) -> Result<Statement> {
    parser.expect_keyword(Keyword::Show)?;
    let args = parser.parse_comma_separated::<Ident>()?;
    Ok(Statement::Show { args })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::testutil::parse_ast;

    #[test]
    fn select_statement() {
        let stmt: Statement = parse_ast("SELECT a FROM t");
        assert!(matches!(stmt, Statement::SelectStmt(_)));
    }

    #[test]
    fn drop_table_multiple_names() {
        let stmt: Statement = parse_ast("DROP TABLE a, b");
        match stmt {
            Statement::DropTable { names } => assert_eq!(names.len(), 2),
            other => panic!("expected DropTable, got {other:?}"),
        }
    }

    #[test]
    fn copy_from_with_options() {
        let stmt: Statement = parse_ast("COPY t FROM 'data.csv' OPTIONS (format = 'csv')");
        match stmt {
            Statement::CopyFrom { options, .. } => assert_eq!(options.len(), 1),
            other => panic!("expected CopyFrom, got {other:?}"),
        }
    }
}
