//! End-to-end `text -> plan` scenarios, one per documented shape: constant
//! projection, bare column, a single aggregate, grouped aggregation,
//! `DISTINCT`, and the two equivalent `LIMIT`/`OFFSET` spellings.

use pretty_assertions::assert_eq;
use tableql_compiler::{compile, default_id_generator, PlanNode};
use tableql_parser::ast::{DerivedColumn, Expr, Ident, ObjectReference, SetFunctionName};
use tableql_parser::Statement;

fn compile_sql(sql: &str) -> PlanNode {
    let stmt = tableql_parser::parse(sql).expect("parse");
    let select = match stmt {
        Statement::SelectStmt(select) => select,
        other => panic!("expected a SELECT statement, got {other:?}"),
    };
    let mut gen = default_id_generator();
    compile(&select, &mut gen).expect("compile")
}

fn table(name: &str) -> ObjectReference {
    ObjectReference(vec![Ident::new(name)])
}

#[test]
fn constant_select_from_dual() {
    let plan = compile_sql("SELECT 42 FROM DUAL");
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
fn bare_column_select() {
    let plan = compile_sql("SELECT a FROM t");
    let expected = PlanNode::transform(
        PlanNode::get_table(table("t"), None),
        vec![DerivedColumn {
            value: Expr::ColumnReference(vec![Ident::new("a")]),
            alias: Some(Ident::new("$0")),
        }],
    );
    assert_eq!(plan, expected);
}

#[test]
fn single_aggregate_without_group_by() {
    let plan = compile_sql("SELECT SUM(a) as s FROM t");
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
                name: SetFunctionName::Sum,
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
fn grouped_aggregate() {
    let plan = compile_sql("SELECT g, SUM(a) as a FROM t GROUP BY g");
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
                name: SetFunctionName::Sum,
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
fn distinct_select() {
    let plan = compile_sql("SELECT DISTINCT g FROM t");
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
fn limit_offset_and_mysql_style_limit_agree() {
    let standard = compile_sql("SELECT a FROM t LIMIT 2 OFFSET 1");
    let mysql_style = compile_sql("SELECT a FROM t LIMIT 1, 2");
    assert_eq!(standard, mysql_style);

    match standard {
        PlanNode::Limit(limit) => {
            assert_eq!(limit.offset, 1);
            assert_eq!(limit.count, 2);
        }
        other => panic!("expected Limit, got {other:?}"),
    }
}
