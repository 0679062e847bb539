use super::PlanNode;
use tableql_parser::ast::DerivedColumn;

/// A scalar-only projection: each entry's `value` must contain no
/// `GeneralSetFunction`. Used for pre-aggregate argument evaluation,
/// post-aggregate arithmetic, and the final user-visible projection.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Transform {
    pub input: Box<PlanNode>,
    pub projections: Vec<DerivedColumn>,
}
