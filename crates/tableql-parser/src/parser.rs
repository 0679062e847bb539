//! The recursive-descent driver: a cursor over a token stream plus the
//! small set of combinators every `AstParseable` impl is built from.

use crate::keywords::Keyword;
use crate::tokens::{Token, TokenWithLocation, Tokenizer, Word};
use tableql_error::{Error, Result};

/// A type that can be parsed from a stream of tokens.
///
/// Every AST node implements this so that composite nodes can just call
/// `SubNode::parse(parser)` instead of duplicating cursor plumbing.
pub trait AstParseable: Sized {
    fn parse(parser: &mut Parser) -> Result<Self>;
}

pub struct Parser {
    toks: Vec<TokenWithLocation>,
    idx: usize,
}

impl Parser {
    pub fn new(toks: Vec<TokenWithLocation>) -> Self {
        Parser { toks, idx: 0 }
    }

    /// Current byte position, or end-of-input if the cursor is past the
    /// last token. Used to anchor error messages.
    pub fn position(&self) -> usize {
        self.toks
            .get(self.idx)
            .map(|t| t.position)
            .unwrap_or_else(|| self.toks.last().map(|t| t.position + 1).unwrap_or(0))
    }

    pub fn at_end(&self) -> bool {
        self.idx >= self.toks.len()
    }

    /// Saves the cursor position for a speculative parse that might need to
    /// backtrack, e.g. trying a join qualifier that turns out not to be
    /// followed by `JOIN`.
    pub fn checkpoint(&self) -> usize {
        self.idx
    }

    pub fn restore(&mut self, checkpoint: usize) {
        self.idx = checkpoint;
    }

    pub fn peek(&self) -> Option<&Token> {
        self.toks.get(self.idx).map(|t| &t.token)
    }

    pub fn peek_nth(&self, n: usize) -> Option<&Token> {
        self.toks.get(self.idx + n).map(|t| &t.token)
    }

    fn found_description(&self) -> String {
        match self.peek() {
            Some(tok) => format!("{tok:?}"),
            None => "end of input".to_string(),
        }
    }

    pub fn next(&mut self) -> Option<Token> {
        let tok = self.toks.get(self.idx).map(|t| t.token.clone());
        if tok.is_some() {
            self.idx += 1;
        }
        tok
    }

    /// Consume the next token if it equals `expected`, returning whether it
    /// did. Does not advance on mismatch.
    pub fn consume_token(&mut self, expected: &Token) -> bool {
        if self.peek() == Some(expected) {
            self.idx += 1;
            true
        } else {
            false
        }
    }

    pub fn expect_token(&mut self, expected: Token) -> Result<()> {
        if self.consume_token(&expected) {
            Ok(())
        } else {
            Err(Error::parse(
                self.position(),
                format!("{expected:?}"),
                self.found_description(),
            ))
        }
    }

    /// Consume the next word-token's keyword if it matches `kw`, returning
    /// whether it matched.
    pub fn parse_keyword(&mut self, kw: Keyword) -> bool {
        match self.peek() {
            Some(Token::Word(w)) if w.keyword == Some(kw) => {
                self.idx += 1;
                true
            }
            _ => false,
        }
    }

    pub fn expect_keyword(&mut self, kw: Keyword) -> Result<()> {
        if self.parse_keyword(kw) {
            Ok(())
        } else {
            Err(Error::parse(
                self.position(),
                kw.as_str().to_string(),
                self.found_description(),
            ))
        }
    }

    /// Try each keyword in turn, consuming and returning the first match.
    pub fn parse_one_of_keywords(&mut self, kws: &[Keyword]) -> Option<Keyword> {
        for &kw in kws {
            if self.parse_keyword(kw) {
                return Some(kw);
            }
        }
        None
    }

    /// Parse a run of keywords that must appear consecutively, e.g. `LEFT
    /// OUTER JOIN`. Fails, without consuming anything, if any keyword in
    /// the sequence is missing.
    pub fn parse_keyword_sequence(&mut self, kws: &[Keyword]) -> bool {
        let start = self.idx;
        for &kw in kws {
            if !self.parse_keyword(kw) {
                self.idx = start;
                return false;
            }
        }
        true
    }

    pub fn peek_word(&self) -> Option<&Word> {
        match self.peek() {
            Some(Token::Word(w)) => Some(w),
            _ => None,
        }
    }

    /// Parse a comma-separated list of `T`, requiring at least one element.
    pub fn parse_comma_separated<T: AstParseable>(&mut self) -> Result<Vec<T>> {
        let mut items = vec![T::parse(self)?];
        while self.consume_token(&Token::Comma) {
            items.push(T::parse(self)?);
        }
        Ok(items)
    }

    pub fn parse_parenthesized_comma_separated<T: AstParseable>(&mut self) -> Result<Vec<T>> {
        self.expect_token(Token::LeftParen)?;
        let items = self.parse_comma_separated()?;
        self.expect_token(Token::RightParen)?;
        Ok(items)
    }

    /// Parse an optional `[AS] <identifier>` alias, where `identifier` is
    /// not one of `reserved`. This is what keeps `SELECT a FROM t` from
    /// trying to parse `FROM` as an alias for `a`.
    pub fn parse_alias(&mut self, reserved: &[Keyword]) -> Result<Option<crate::ast::Ident>> {
        let explicit_as = self.parse_keyword(Keyword::As);
        match self.peek_word().cloned() {
            Some(w) if w.keyword.is_none() || explicit_as => {
                self.idx += 1;
                Ok(Some(crate::ast::Ident::from_word(w)))
            }
            Some(w) if !reserved.contains(&w.keyword.unwrap()) => {
                self.idx += 1;
                Ok(Some(crate::ast::Ident::from_word(w)))
            }
            _ if explicit_as => Err(Error::parse(
                self.position(),
                "alias identifier".to_string(),
                self.found_description(),
            )),
            _ => Ok(None),
        }
    }
}

/// Tokenize and parse a single `Statement` out of `sql`.
///
/// A lone trailing `;` is tolerated; anything further is an error, since
/// multi-statement scripts aren't part of this grammar.
pub fn parse_statement(sql: &str) -> Result<crate::ast::Statement> {
    let toks = Tokenizer::new(sql).tokenize()?;
    let mut parser = Parser::new(toks);

    tracing::trace!(sql, "parsing statement");

    let stmt = crate::ast::Statement::parse(&mut parser)?;
    parser.consume_token(&Token::SemiColon);

    if !parser.at_end() {
        return Err(Error::parse(
            parser.position(),
            "end of input".to_string(),
            parser.found_description(),
        ));
    }

    Ok(stmt)
}
