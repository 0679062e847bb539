use super::PlanNode;

/// Skips `offset` rows of `input`, then yields up to `count` more.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Limit {
    pub input: Box<PlanNode>,
    pub offset: u64,
    pub count: u64,
}
