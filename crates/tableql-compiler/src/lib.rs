//! Lowers a parsed `SELECT` statement into a logical plan DAG.
//!
//! Three pieces, each usable on its own: [`ids`] supplies fresh names,
//! [`splitter`] rewrites mixed scalar/aggregate expressions into purely
//! scalar stages, and [`compiler`] orchestrates both of those plus
//! `FROM`/`WHERE`/`ORDER BY`/`LIMIT` handling into a [`plan::PlanNode`].
//!
//! `tableql_parser::parse` is re-exported here so a caller who only wants
//! the end-to-end `text -> plan` pipeline doesn't need a second crate
//! dependency for parsing.

pub mod compiler;
pub mod ids;
pub mod plan;
pub mod splitter;

pub use compiler::compile;
pub use ids::{default_id_generator, Counter, IdGenerator};
pub use plan::PlanNode;
pub use splitter::{split_aggregate, split_aggregates};
pub use tableql_parser::parse;
