//! Recursive-descent parser for the analytical `SELECT` subset of SQL
//! supported by this query engine's core.
//!
//! The pipeline is the usual two stages: [`tokens::Tokenizer`] turns source
//! text into a flat, located token stream, and [`parser::Parser`] drives the
//! grammar over that stream one [`parser::AstParseable`] node at a time.

pub mod ast;
pub mod keywords;
pub mod parser;
pub mod tokens;

pub use ast::Statement;
pub use parser::parse_statement as parse;
