use super::PlanNode;
use tableql_parser::ast::{Expr, JoinHow};

/// A non-cross join between `left` and `right`. `on` is an arbitrary
/// boolean expression; extracting equi-join keys from it is the runtime's
/// job, not the compiler's.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Join {
    pub left: Box<PlanNode>,
    pub right: Box<PlanNode>,
    pub how: JoinHow,
    pub on: Expr,
}
