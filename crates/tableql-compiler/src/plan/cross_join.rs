use super::PlanNode;

/// The cartesian product of `left` and `right`, used both for comma-joined
/// `FROM` lists and explicit `CROSS JOIN`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CrossJoin {
    pub left: Box<PlanNode>,
    pub right: Box<PlanNode>,
}
