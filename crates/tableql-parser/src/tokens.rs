//! Lexing: turn a query string into a flat stream of located tokens ahead of
//! parsing.
//!
//! Kept deliberately separate from [`crate::parser::Parser`] so error
//! positions can be computed purely from byte offsets into the original
//! source, independent of how far the recursive-descent parser has
//! backtracked.

use crate::keywords::Keyword;
use tableql_error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    /// Text as written in the source, including original case.
    pub value: String,
    /// Whether this word was written with double quotes. Quoted words are
    /// never classified as keywords.
    pub quoted: bool,
    pub keyword: Option<Keyword>,
}

impl Word {
    fn unquoted(value: String) -> Self {
        let keyword = Keyword::from_word(&value.to_ascii_uppercase());
        Word {
            value,
            quoted: false,
            keyword,
        }
    }

    fn quoted(value: String) -> Self {
        Word {
            value,
            quoted: true,
            keyword: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Word(Word),
    /// Unparsed numeric literal text, tagged with whether it looked like a
    /// float (contains `.`).
    Number { text: String, is_float: bool },
    /// Single-quoted string literal, the exact source text including the
    /// surrounding quotes (see `Expr::String` in the AST).
    SingleQuotedString(String),
    LeftParen,
    RightParen,
    Comma,
    Period,
    SemiColon,
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenWithLocation {
    pub token: Token,
    pub position: usize,
}

impl TokenWithLocation {
    pub fn keyword(&self) -> Option<Keyword> {
        match &self.token {
            Token::Word(w) => w.keyword,
            _ => None,
        }
    }
}

pub struct Tokenizer<'a> {
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    source: &'a str,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Tokenizer {
            chars: source.char_indices().peekable(),
            source,
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<TokenWithLocation>> {
        let mut toks = Vec::new();

        while let Some(&(pos, ch)) = self.chars.peek() {
            if ch.is_whitespace() {
                self.chars.next();
                continue;
            }

            if ch == '-' && self.peek_second() == Some('-') {
                self.skip_line_comment();
                continue;
            }

            let token = match ch {
                '(' => self.single(Token::LeftParen),
                ')' => self.single(Token::RightParen),
                ',' => self.single(Token::Comma),
                '.' => self.single(Token::Period),
                ';' => self.single(Token::SemiColon),
                '+' => self.single(Token::Plus),
                '-' => self.single(Token::Minus),
                '*' => self.single(Token::Star),
                '/' => self.single(Token::Slash),
                '%' => self.single(Token::Percent),
                '=' => self.single(Token::Eq),
                '<' => {
                    self.chars.next();
                    match self.chars.peek().map(|&(_, c)| c) {
                        Some('>') => {
                            self.chars.next();
                            Token::Neq
                        }
                        Some('=') => {
                            self.chars.next();
                            Token::LtEq
                        }
                        _ => Token::Lt,
                    }
                }
                '>' => {
                    self.chars.next();
                    match self.chars.peek().map(|&(_, c)| c) {
                        Some('=') => {
                            self.chars.next();
                            Token::GtEq
                        }
                        _ => Token::Gt,
                    }
                }
                '\'' => self.lex_single_quoted_string(pos)?,
                '"' => self.lex_double_quoted_ident(pos)?,
                c if c.is_ascii_digit() => self.lex_number(),
                c if is_ident_start(c) => self.lex_word(),
                other => {
                    return Err(Error::parse(
                        pos,
                        "a valid token".to_string(),
                        format!("'{other}'"),
                    ))
                }
            };

            toks.push(TokenWithLocation { token, position: pos });
        }

        Ok(toks)
    }

    fn peek_second(&self) -> Option<char> {
        let mut iter = self.chars.clone();
        iter.next();
        iter.next().map(|(_, c)| c)
    }

    fn skip_line_comment(&mut self) {
        for (_, c) in self.chars.by_ref() {
            if c == '\n' {
                break;
            }
        }
    }

    fn single(&mut self, token: Token) -> Token {
        self.chars.next();
        token
    }

    fn lex_word(&mut self) -> Token {
        let start = self.chars.peek().unwrap().0;
        let mut end = start;
        while let Some(&(pos, c)) = self.chars.peek() {
            if is_ident_continue(c) {
                end = pos + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }
        Token::Word(Word::unquoted(self.source[start..end].to_string()))
    }

    fn lex_number(&mut self) -> Token {
        let start = self.chars.peek().unwrap().0;
        let mut end = start;
        let mut is_float = false;

        while let Some(&(pos, c)) = self.chars.peek() {
            if c.is_ascii_digit() {
                end = pos + c.len_utf8();
                self.chars.next();
            } else if c == '.' && !is_float {
                is_float = true;
                end = pos + c.len_utf8();
                self.chars.next();
            } else {
                break;
            }
        }

        if let Some(exponent_end) = self.match_exponent() {
            is_float = true;
            end = exponent_end;
        }

        Token::Number {
            text: self.source[start..end].to_string(),
            is_float,
        }
    }

    /// Speculatively matches a `[eE][+-]?digits` exponent tail at the
    /// current position, committing the cursor past it and returning the
    /// new end offset only if at least one digit follows the sign. A
    /// dangling `e`/`e-` (no digits) is left untouched, so e.g. a bare `e`
    /// right after a number still lexes as its own word token.
    fn match_exponent(&mut self) -> Option<usize> {
        let mut probe = self.chars.clone();
        match probe.next() {
            Some((_, 'e' | 'E')) => {}
            _ => return None,
        }
        if let Some(&(_, c)) = probe.peek() {
            if c == '+' || c == '-' {
                probe.next();
            }
        }
        let mut end = None;
        while let Some(&(pos, c)) = probe.peek() {
            if c.is_ascii_digit() {
                end = Some(pos + c.len_utf8());
                probe.next();
            } else {
                break;
            }
        }
        let end = end?;
        self.chars = probe;
        Some(end)
    }

    /// Captures the verbatim source text of the literal, quotes and all
    /// (including any `''` escapes), rather than unescaping it: `Expr::String`
    /// keeps the literal in its original written form.
    fn lex_single_quoted_string(&mut self, start: usize) -> Result<Token> {
        self.chars.next(); // opening quote

        loop {
            match self.chars.next() {
                Some((end, '\'')) => {
                    // `''` is an escaped quote inside the literal, not the
                    // closing quote.
                    if self.chars.peek().map(|&(_, c)| c) == Some('\'') {
                        self.chars.next();
                        continue;
                    }
                    return Ok(Token::SingleQuotedString(
                        self.source[start..end + 1].to_string(),
                    ));
                }
                Some(_) => continue,
                None => {
                    return Err(Error::parse(
                        start,
                        "closing \"'\"".to_string(),
                        "end of input".to_string(),
                    ))
                }
            }
        }
    }

    fn lex_double_quoted_ident(&mut self, start: usize) -> Result<Token> {
        self.chars.next(); // opening quote
        let mut value = String::new();

        loop {
            match self.chars.next() {
                Some((_, '"')) => return Ok(Token::Word(Word::quoted(value))),
                Some((_, c)) => value.push(c),
                None => {
                    return Err(Error::parse(
                        start,
                        "closing '\"'".to_string(),
                        "end of input".to_string(),
                    ))
                }
            }
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<Token> {
        Tokenizer::new(s)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.token)
            .collect()
    }

    #[test]
    fn simple_select() {
        let got = toks("SELECT a FROM t");
        assert_eq!(
            got,
            vec![
                Token::Word(Word::unquoted("SELECT".to_string())),
                Token::Word(Word::unquoted("a".to_string())),
                Token::Word(Word::unquoted("FROM".to_string())),
                Token::Word(Word::unquoted("t".to_string())),
            ]
        );
    }

    #[test]
    fn string_literal_kept_verbatim() {
        let got = toks("'it''s'");
        assert_eq!(got, vec![Token::SingleQuotedString("'it''s'".to_string())]);
    }

    #[test]
    fn quoted_ident_preserves_case() {
        let got = toks("\"MixedCase\"");
        match &got[0] {
            Token::Word(w) => {
                assert_eq!(w.value, "MixedCase");
                assert!(w.quoted);
                assert!(w.keyword.is_none());
            }
            other => panic!("expected word, got {other:?}"),
        }
    }

    #[test]
    fn comparison_operators() {
        let got = toks("<> <= >= < > =");
        assert_eq!(
            got,
            vec![
                Token::Neq,
                Token::LtEq,
                Token::GtEq,
                Token::Lt,
                Token::Gt,
                Token::Eq,
            ]
        );
    }

    #[test]
    fn line_comment_skipped() {
        let got = toks("a -- trailing comment\nb");
        assert_eq!(
            got,
            vec![
                Token::Word(Word::unquoted("a".to_string())),
                Token::Word(Word::unquoted("b".to_string())),
            ]
        );
    }

    #[test]
    fn float_literal() {
        let got = toks("3.14");
        assert_eq!(
            got,
            vec![Token::Number {
                text: "3.14".to_string(),
                is_float: true
            }]
        );
    }

    #[test]
    fn exponent_literal() {
        let got = toks("1e5 1.5e-3 2E+1");
        assert_eq!(
            got,
            vec![
                Token::Number {
                    text: "1e5".to_string(),
                    is_float: true,
                },
                Token::Number {
                    text: "1.5e-3".to_string(),
                    is_float: true,
                },
                Token::Number {
                    text: "2E+1".to_string(),
                    is_float: true,
                },
            ]
        );
    }

    #[test]
    fn dangling_e_is_not_an_exponent() {
        let got = toks("1e");
        assert_eq!(
            got,
            vec![
                Token::Number {
                    text: "1".to_string(),
                    is_float: false,
                },
                Token::Word(Word::unquoted("e".to_string())),
            ]
        );
    }
}
