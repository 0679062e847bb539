use super::PlanNode;
use tableql_parser::ast::Expr;

/// Keeps rows of `input` for which `predicate` evaluates true. Used for both
/// `WHERE` and, applied after the final projection, `HAVING`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Filter {
    pub input: Box<PlanNode>,
    pub predicate: Expr,
}
