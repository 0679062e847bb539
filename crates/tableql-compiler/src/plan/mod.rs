//! The logical plan: a small, fixed vocabulary of relational operators, each
//! owning its input(s). One module per operator, aggregated here into the
//! [`PlanNode`] tagged union an external runtime pattern-matches over.

mod aggregate;
mod cross_join;
mod drop_duplicates;
mod filter;
mod get_table;
mod join;
mod limit;
mod sort;
mod transform;

pub use aggregate::Aggregate;
pub use cross_join::CrossJoin;
pub use drop_duplicates::DropDuplicates;
pub use filter::Filter;
pub use get_table::GetTable;
pub use join::Join;
pub use limit::Limit;
pub use sort::{Sort, SortKey};
pub use transform::Transform;

use tableql_parser::ast::JoinHow;

/// A node in the logical plan DAG. Every query compiles to exactly one of
/// these, rooted at the outermost operator applied.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlanNode {
    GetTable(GetTable),
    Filter(Filter),
    Transform(Transform),
    Aggregate(Aggregate),
    Sort(Sort),
    Limit(Limit),
    DropDuplicates(DropDuplicates),
    CrossJoin(CrossJoin),
    Join(Join),
}

impl PlanNode {
    pub fn get_table(name: tableql_parser::ast::ObjectReference, alias: Option<tableql_parser::ast::Ident>) -> Self {
        PlanNode::GetTable(GetTable { name, alias })
    }

    pub fn filter(input: PlanNode, predicate: tableql_parser::ast::Expr) -> Self {
        PlanNode::Filter(Filter {
            input: Box::new(input),
            predicate,
        })
    }

    pub fn transform(input: PlanNode, projections: Vec<tableql_parser::ast::DerivedColumn>) -> Self {
        PlanNode::Transform(Transform {
            input: Box::new(input),
            projections,
        })
    }

    pub fn aggregate(
        input: PlanNode,
        aggregates: Vec<tableql_parser::ast::DerivedColumn>,
        group_by: Option<Vec<tableql_parser::ast::Expr>>,
    ) -> Self {
        PlanNode::Aggregate(Aggregate {
            input: Box::new(input),
            aggregates,
            group_by,
        })
    }

    pub fn sort(input: PlanNode, keys: Vec<SortKey>) -> Self {
        PlanNode::Sort(Sort {
            input: Box::new(input),
            keys,
        })
    }

    pub fn limit(input: PlanNode, offset: u64, count: u64) -> Self {
        PlanNode::Limit(Limit {
            input: Box::new(input),
            offset,
            count,
        })
    }

    pub fn drop_duplicates(input: PlanNode) -> Self {
        PlanNode::DropDuplicates(DropDuplicates {
            input: Box::new(input),
        })
    }

    pub fn cross_join(left: PlanNode, right: PlanNode) -> Self {
        PlanNode::CrossJoin(CrossJoin {
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn join(left: PlanNode, right: PlanNode, how: JoinHow, on: tableql_parser::ast::Expr) -> Self {
        PlanNode::Join(Join {
            left: Box::new(left),
            right: Box::new(right),
            how,
            on,
        })
    }
}
