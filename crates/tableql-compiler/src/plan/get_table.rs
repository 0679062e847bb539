use tableql_parser::ast::{Ident, ObjectReference};

/// Leaf operator: scans a named table from the host's table registry.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GetTable {
    pub name: ObjectReference,
    pub alias: Option<Ident>,
}
