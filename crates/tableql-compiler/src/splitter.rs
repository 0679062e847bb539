//! Rewrites an expression that mixes scalar operators and `GeneralSetFunction`
//! calls into three purely scalar stages: the pre-aggregate argument
//! projection, the aggregation itself, and whatever scalar arithmetic the
//! original expression wrapped around the aggregate.
//!
//! This is what lets the rest of the compiler treat scalar projection and
//! aggregation as two separate, simple operators instead of one that has to
//! understand nested aggregate expressions.

use crate::ids::IdGenerator;
use tableql_error::{Error, Result};
use tableql_parser::ast::{DerivedColumn, Expr};

/// One aggregate's fresh alias pair: `p` names its pre-aggregate argument
/// column, `a` names the aggregate's own result column. Both are `$N`
/// strings, since the leading `$` is what guarantees a minted alias can
/// never collide with a user-written identifier.
fn fresh_pair(gen: &mut dyn IdGenerator) -> (tableql_parser::ast::Ident, tableql_parser::ast::Ident) {
    let p = tableql_parser::ast::Ident::new(format!("${}", gen.next()));
    let a = tableql_parser::ast::Ident::new(format!("${}", gen.next()));
    (p, a)
}

fn column_ref(ident: &tableql_parser::ast::Ident) -> Expr {
    Expr::ColumnReference(vec![ident.clone()])
}

/// Splits a single expression. Returns `(rewritten, aggregates, pre_aggregates)`
/// per the module doc: `rewritten` contains no `GeneralSetFunction`,
/// `aggregates` has one `DerivedColumn` per aggregate found (aliased by its
/// fresh `a` name), and `pre_aggregates` has one `DerivedColumn` per
/// aggregate's argument (aliased by its fresh `p` name).
pub fn split_aggregate(
    expr: &Expr,
    gen: &mut dyn IdGenerator,
) -> Result<(Expr, Vec<DerivedColumn>, Vec<DerivedColumn>)> {
    match expr {
        Expr::ColumnReference(_)
        | Expr::Integer(_)
        | Expr::Float(_)
        | Expr::String(_)
        | Expr::Bool(_)
        | Expr::Null
        | Expr::Asterisk => Ok((expr.clone(), Vec::new(), Vec::new())),

        Expr::BinaryExpression { op, left, right } => {
            let (left_r, mut aggs, mut pre) = split_aggregate(left, gen)?;
            let (right_r, right_aggs, right_pre) = split_aggregate(right, gen)?;
            aggs.extend(right_aggs);
            pre.extend(right_pre);
            Ok((
                Expr::BinaryExpression {
                    op: *op,
                    left: Box::new(left_r),
                    right: Box::new(right_r),
                },
                aggs,
                pre,
            ))
        }

        Expr::UnaryExpression { op, operand } => {
            let (operand_r, aggs, pre) = split_aggregate(operand, gen)?;
            Ok((
                Expr::UnaryExpression {
                    op: *op,
                    operand: Box::new(operand_r),
                },
                aggs,
                pre,
            ))
        }

        Expr::FunctionCall { name, arguments } => {
            let mut rewritten = Vec::with_capacity(arguments.len());
            let mut aggs = Vec::new();
            let mut pre = Vec::new();
            for arg in arguments {
                let (arg_r, arg_aggs, arg_pre) = split_aggregate(arg, gen)?;
                rewritten.push(arg_r);
                aggs.extend(arg_aggs);
                pre.extend(arg_pre);
            }
            Ok((
                Expr::FunctionCall {
                    name: name.clone(),
                    arguments: rewritten,
                },
                aggs,
                pre,
            ))
        }

        Expr::CaseExpression { cases, else_ } => {
            let mut rewritten_cases = Vec::with_capacity(cases.len());
            let mut aggs = Vec::new();
            let mut pre = Vec::new();
            for case in cases {
                let (cond_r, cond_aggs, cond_pre) = split_aggregate(&case.condition, gen)?;
                let (result_r, result_aggs, result_pre) = split_aggregate(&case.result, gen)?;
                aggs.extend(cond_aggs);
                pre.extend(cond_pre);
                aggs.extend(result_aggs);
                pre.extend(result_pre);
                rewritten_cases.push(tableql_parser::ast::CaseWhen {
                    condition: cond_r,
                    result: result_r,
                });
            }
            let rewritten_else = match else_ {
                Some(e) => {
                    let (e_r, e_aggs, e_pre) = split_aggregate(e, gen)?;
                    aggs.extend(e_aggs);
                    pre.extend(e_pre);
                    Some(Box::new(e_r))
                }
                None => None,
            };
            Ok((
                Expr::CaseExpression {
                    cases: rewritten_cases,
                    else_: rewritten_else,
                },
                aggs,
                pre,
            ))
        }

        Expr::Cast { value, type_name } => {
            let (value_r, aggs, pre) = split_aggregate(value, gen)?;
            Ok((
                Expr::Cast {
                    value: Box::new(value_r),
                    type_name: type_name.clone(),
                },
                aggs,
                pre,
            ))
        }

        Expr::GeneralSetFunction { name, argument } => {
            let (inner_r, inner_aggs, inner_pre) = split_aggregate(argument, gen)?;
            if !inner_aggs.is_empty() {
                return Err(Error::nested_aggregate(format!(
                    "{} contains another aggregate in its argument",
                    name.as_str()
                )));
            }

            let (p, a) = fresh_pair(gen);
            let pre_aggregate = DerivedColumn {
                value: inner_r,
                alias: Some(p.clone()),
            };
            let aggregate = DerivedColumn {
                value: Expr::GeneralSetFunction {
                    name: *name,
                    argument: Box::new(column_ref(&p)),
                },
                alias: Some(a.clone()),
            };

            let mut pre = inner_pre;
            pre.push(pre_aggregate);

            Ok((column_ref(&a), vec![aggregate], pre))
        }
    }
}

/// Splits an entire select list (or any ordered sequence of derived
/// columns, e.g. a `HAVING` target list): each entry's value is split in
/// turn, left to right, and the resulting aggregate/pre-aggregate lists are
/// concatenated in that same order. The entry's own alias is preserved.
pub fn split_aggregates(
    columns: &[DerivedColumn],
    gen: &mut dyn IdGenerator,
) -> Result<(Vec<DerivedColumn>, Vec<DerivedColumn>, Vec<DerivedColumn>)> {
    let mut rewritten = Vec::with_capacity(columns.len());
    let mut aggregates = Vec::new();
    let mut pre_aggregates = Vec::new();

    for column in columns {
        let (value_r, aggs, pre) = split_aggregate(&column.value, gen)?;
        rewritten.push(DerivedColumn {
            value: value_r,
            alias: column.alias.clone(),
        });
        aggregates.extend(aggs);
        pre_aggregates.extend(pre);
    }

    Ok((rewritten, aggregates, pre_aggregates))
}
