use super::PlanNode;
use tableql_parser::ast::{Expr, SortOrder};

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SortKey {
    pub expr: Expr,
    pub order: SortOrder,
}

/// Orders rows of `input` by `keys`, applied in order (first key is
/// primary). Sees the post-aggregation, pre-final-projection schema, so
/// ordering by a grouped or aggregated column works by its alias.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Sort {
    pub input: Box<PlanNode>,
    pub keys: Vec<SortKey>,
}
