use crate::error_handling::*;
use crate::parsing::*;

use std::collections::HashMap;

/// Magnitudes below this count as zero, both for division and for deciding
/// whether a result is printed as an integer.
pub const EPSILON: f64 = 1e-7;

pub type Variables = HashMap<String, f64>;

fn checked(result: f64) -> Result<f64> {
    if result.is_finite() {
        Ok(result)
    } else {
        Err(CalcError::invalid_operation)
    }
}

/// Computes the value of `node`, looking variables up in `variables`.
///
/// Children are evaluated left to right before their operator is applied. A
/// NaN or infinite intermediate result fails the whole evaluation.
pub fn evaluate(node: &ExprNode, variables: &Variables) -> Result<f64> {
    match node {
        ExprNode::value(value) => checked(*value),

        ExprNode::variable(name) => variables.get(name)
            .copied()
            .ok_or_else(|| CalcError::undefined(name.clone())),

        ExprNode::unary(operator, child) => {
            let value = evaluate(child, variables)?;
            checked(operator.call(value))
        },

        ExprNode::binary(operator, left, right) => {
            let left = evaluate(left, variables)?;
            let right = evaluate(right, variables)?;
            checked(operator.call(left, right)?)
        },
    }
}
