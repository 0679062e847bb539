use super::PlanNode;
use tableql_parser::ast::{DerivedColumn, Expr};

/// Each entry in `aggregates` is a `DerivedColumn` whose value is a
/// `GeneralSetFunction` over a `ColumnReference` produced by the
/// `Transform` beneath this node. `group_by` carries the normalized
/// group-by key list (see the compiler's GROUP BY normalization step).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Aggregate {
    pub input: Box<PlanNode>,
    pub aggregates: Vec<DerivedColumn>,
    pub group_by: Option<Vec<Expr>>,
}
