use super::PlanNode;

/// Collapses duplicate rows of `input`, implementing `SELECT DISTINCT`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DropDuplicates {
    pub input: Box<PlanNode>,
}
