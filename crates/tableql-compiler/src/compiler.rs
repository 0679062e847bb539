//! Lowers a parsed `Select` into a logical plan DAG.
//!
//! The eight steps below run in a fixed order so that aliases introduced by
//! one step (a `FROM`-list alias, a splitter-minted `$N`, a group-by
//! collapse) are visible to the next. Nothing here touches table data; the
//! whole pipeline is a pure tree rewrite.

use crate::ids::IdGenerator;
use crate::plan::{PlanNode, SortKey};
use crate::splitter::split_aggregates;
use tableql_error::{Error, Result};
use tableql_parser::ast::{DerivedColumn, Expr, Ident, Join as AstJoin, Select, SelectList, SetQuantifier, TableRef};

/// Compiles a single `Select` AST node into its plan root.
pub fn compile(select: &Select, gen: &mut dyn IdGenerator) -> Result<PlanNode> {
    tracing::debug!(
        from_tables = select.from_clause.len(),
        "compiling select into a logical plan"
    );

    // 1. FROM
    if select.from_clause.is_empty() {
        return Err(Error::EmptyFromClause);
    }
    let mut plan = compile_table_ref(&select.from_clause[0], gen)?;
    for table_ref in &select.from_clause[1..] {
        let right = compile_table_ref(table_ref, gen)?;
        plan = PlanNode::cross_join(plan, right);
    }

    // 2. WHERE
    if let Some(predicate) = &select.where_clause {
        plan = PlanNode::filter(plan, predicate.clone());
    }

    // 3. Projection + aggregation.
    let final_columns = match &select.select_list {
        SelectList::Asterisk => {
            if select.group_by_clause.is_some() {
                return Err(Error::AsteriskWithGroupBy);
            }
            None
        }
        SelectList::Columns(columns) => {
            let (rewritten, aggregates, mut pre_aggregates) = split_aggregates(columns, gen)?;

            let group_by = match &select.group_by_clause {
                Some(group_exprs) => {
                    let (group_pre, keys) = normalize_group_by(group_exprs, columns, gen);
                    pre_aggregates.extend(group_pre);
                    Some(keys)
                }
                None => None,
            };

            if !pre_aggregates.is_empty() {
                plan = PlanNode::transform(plan, pre_aggregates);
            }
            if !aggregates.is_empty() {
                plan = PlanNode::aggregate(plan, aggregates, group_by);
            }

            Some(rewritten)
        }
    };

    // 4. ORDER BY — sees the post-aggregation, pre-final-projection schema.
    if !select.order_by_clause.is_empty() {
        let keys = select
            .order_by_clause
            .iter()
            .map(|o| SortKey {
                expr: o.expr.clone(),
                order: o.order,
            })
            .collect();
        plan = PlanNode::sort(plan, keys);
    }

    // 5. Final projection, producing user-visible columns. Skipped for `*`.
    if let Some(columns) = final_columns {
        plan = PlanNode::transform(plan, columns);
    }

    // 6. HAVING — references the user's aliases, since it runs after the
    // final projection.
    if let Some(having) = &select.having_clause {
        plan = PlanNode::filter(plan, having.clone());
    }

    // 7. DISTINCT
    match select.set_quantifier {
        SetQuantifier::Distinct => plan = PlanNode::drop_duplicates(plan),
        SetQuantifier::All => {}
    }

    // 8. LIMIT
    if let Some(limit) = &select.limit_clause {
        plan = PlanNode::limit(plan, limit.offset, limit.limit);
    }

    Ok(plan)
}

fn compile_table_ref(table_ref: &TableRef, gen: &mut dyn IdGenerator) -> Result<PlanNode> {
    match table_ref {
        TableRef::TableName { table, alias } => {
            Ok(PlanNode::get_table(table.clone(), alias.clone()))
        }
        TableRef::Subquery { query, .. } => compile(query, gen),
        TableRef::JoinedTable { left, joins } => {
            let mut plan = compile_table_ref(left, gen)?;
            for join in joins {
                plan = match join {
                    AstJoin::CrossJoin { table } => {
                        let right = compile_table_ref(table, gen)?;
                        PlanNode::cross_join(plan, right)
                    }
                    AstJoin::Join { how, table, on } => {
                        let right = compile_table_ref(table, gen)?;
                        PlanNode::join(plan, right, *how, on.clone())
                    }
                };
            }
            Ok(plan)
        }
    }
}

/// Picks an alias for each `GROUP BY` expression and appends a
/// `DerivedColumn` for it to the pre-aggregate projection, returning the
/// effective group-by key list (always bare `ColumnReference`s into that
/// projection).
///
/// A bare column reference groups by its own name, consuming no fresh id.
/// An expression that already appears, aliased, in the select list reuses
/// that alias rather than minting a redundant synthetic column (this is a
/// refinement on top of the reference behavior, documented where the
/// ambient stack's design decisions are recorded). Anything else gets a
/// fresh `$N`.
fn normalize_group_by(
    group_exprs: &[Expr],
    select_list: &[DerivedColumn],
    gen: &mut dyn IdGenerator,
) -> (Vec<DerivedColumn>, Vec<Expr>) {
    let mut pre_aggregates = Vec::with_capacity(group_exprs.len());
    let mut keys = Vec::with_capacity(group_exprs.len());

    for expr in group_exprs {
        let alias = if let Expr::ColumnReference(parts) = expr {
            parts.last().cloned().expect("ColumnReference has >= 1 part")
        } else if let Some(existing) = select_list
            .iter()
            .find(|dc| &dc.value == expr && dc.alias.is_some())
        {
            existing.alias.clone().expect("checked is_some above")
        } else {
            Ident::new(format!("${}", gen.next()))
        };

        pre_aggregates.push(DerivedColumn {
            value: expr.clone(),
            alias: Some(alias.clone()),
        });
        keys.push(Expr::ColumnReference(vec![alias]));
    }

    (pre_aggregates, keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::Counter;
    use crate::plan::PlanNode;
    use pretty_assertions::assert_eq;
    use tableql_parser::ast::ObjectReference;

    fn parse_select(sql: &str) -> Select {
        match tableql_parser::parse(sql).unwrap() {
            tableql_parser::Statement::SelectStmt(select) => select,
            other => panic!("expected SelectStmt, got {other:?}"),
        }
    }

    fn table(name: &str) -> ObjectReference {
        ObjectReference(vec![Ident::new(name)])
    }

    #[test]
    fn select_constant_from_dual() {
        let select = parse_select("SELECT 42 FROM DUAL");
        let mut gen = Counter::new();
        let plan = compile(&select, &mut gen).unwrap();

        let expected = PlanNode::transform(
            PlanNode::get_table(table("DUAL"), None),
            vec![DerivedColumn {
                value: Expr::Integer("42".to_string()),
                alias: Some(Ident::new("$0")),
            }],
        );
        assert_eq!(plan, expected);
    }

    #[test]
    fn sum_aggregate_sandwiches_transform_around_aggregate() {
        let select = parse_select("SELECT SUM(a) as s FROM t");
        let mut gen = Counter::new();
        let plan = compile(&select, &mut gen).unwrap();

        let pre = PlanNode::transform(
            PlanNode::get_table(table("t"), None),
            vec![DerivedColumn {
                value: Expr::ColumnReference(vec![Ident::new("a")]),
                alias: Some(Ident::new("$0")),
            }],
        );
        let aggregate = PlanNode::aggregate(
            pre,
            vec![DerivedColumn {
                value: Expr::GeneralSetFunction {
                    name: tableql_parser::ast::SetFunctionName::Sum,
                    argument: Box::new(Expr::ColumnReference(vec![Ident::new("$0")])),
                },
                alias: Some(Ident::new("$1")),
            }],
            None,
        );
        let expected = PlanNode::transform(
            aggregate,
            vec![DerivedColumn {
                value: Expr::ColumnReference(vec![Ident::new("$1")]),
                alias: Some(Ident::new("s")),
            }],
        );
        assert_eq!(plan, expected);
    }

    #[test]
    fn group_by_bare_column_collapses_alias() {
        let select = parse_select("SELECT g, SUM(a) as a FROM t GROUP BY g");
        let mut gen = Counter::new();
        let plan = compile(&select, &mut gen).unwrap();

        let pre = PlanNode::transform(
            PlanNode::get_table(table("t"), None),
            vec![
                DerivedColumn {
                    value: Expr::ColumnReference(vec![Ident::new("a")]),
                    alias: Some(Ident::new("$0")),
                },
                DerivedColumn {
                    value: Expr::ColumnReference(vec![Ident::new("g")]),
                    alias: Some(Ident::new("g")),
                },
            ],
        );
        let aggregate = PlanNode::aggregate(
            pre,
            vec![DerivedColumn {
                value: Expr::GeneralSetFunction {
                    name: tableql_parser::ast::SetFunctionName::Sum,
                    argument: Box::new(Expr::ColumnReference(vec![Ident::new("$0")])),
                },
                alias: Some(Ident::new("$1")),
            }],
            Some(vec![Expr::ColumnReference(vec![Ident::new("g")])]),
        );
        let expected = PlanNode::transform(
            aggregate,
            vec![
                DerivedColumn {
                    value: Expr::ColumnReference(vec![Ident::new("g")]),
                    alias: None,
                },
                DerivedColumn {
                    value: Expr::ColumnReference(vec![Ident::new("$1")]),
                    alias: Some(Ident::new("a")),
                },
            ],
        );
        assert_eq!(plan, expected);
    }

    #[test]
    fn distinct_wraps_in_drop_duplicates() {
        let select = parse_select("SELECT DISTINCT g FROM t");
        let mut gen = Counter::new();
        let plan = compile(&select, &mut gen).unwrap();

        let expected = PlanNode::drop_duplicates(PlanNode::transform(
            PlanNode::get_table(table("t"), None),
            vec![DerivedColumn {
                value: Expr::ColumnReference(vec![Ident::new("g")]),
                alias: None,
            }],
        ));
        assert_eq!(plan, expected);
    }

    #[test]
    fn limit_offset_forms_agree() {
        let mut gen_a = Counter::new();
        let plan_a = compile(&parse_select("SELECT a FROM t LIMIT 2 OFFSET 1"), &mut gen_a).unwrap();
        let mut gen_b = Counter::new();
        let plan_b = compile(&parse_select("SELECT a FROM t LIMIT 1, 2"), &mut gen_b).unwrap();
        assert_eq!(plan_a, plan_b);
        match plan_a {
            PlanNode::Limit(limit) => {
                assert_eq!(limit.offset, 1);
                assert_eq!(limit.count, 2);
            }
            other => panic!("expected Limit, got {other:?}"),
        }
    }

    #[test]
    fn empty_from_clause_is_unreachable_from_the_parser() {
        // The grammar requires `FROM`, so this failure mode is only
        // reachable by constructing a `Select` by hand.
        let select = Select {
            set_quantifier: SetQuantifier::All,
            select_list: SelectList::Asterisk,
            from_clause: Vec::new(),
            where_clause: None,
            group_by_clause: None,
            having_clause: None,
            order_by_clause: Vec::new(),
            limit_clause: None,
        };
        let mut gen = Counter::new();
        let err = compile(&select, &mut gen).unwrap_err();
        assert_eq!(err, tableql_error::Error::EmptyFromClause);
    }

    #[test]
    fn asterisk_with_group_by_is_rejected() {
        let select = Select {
            set_quantifier: SetQuantifier::All,
            select_list: SelectList::Asterisk,
            from_clause: vec![TableRef::TableName {
                table: table("t"),
                alias: None,
            }],
            where_clause: None,
            group_by_clause: Some(vec![Expr::ColumnReference(vec![Ident::new("g")])]),
            having_clause: None,
            order_by_clause: Vec::new(),
            limit_clause: None,
        };
        let mut gen = Counter::new();
        let err = compile(&select, &mut gen).unwrap_err();
        assert_eq!(err, tableql_error::Error::AsteriskWithGroupBy);
    }
}
