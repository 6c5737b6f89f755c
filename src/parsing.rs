use crate::error_handling::*;
use crate::evaluating::EPSILON;
use crate::scanning::*;
use std::str::FromStr;

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    sine,
    cosine,
    logarithm,
}

impl UnaryOperator {
    pub fn call(&self, value: f64) -> f64 {
        use UnaryOperator::*;
        match self {
            sine => value.sin(),
            cosine => value.cos(),
            logarithm => value.ln(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidOperator;

impl FromStr for UnaryOperator {
    type Err = InvalidOperator;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        use UnaryOperator::*;
        match s {
            "sin" => Ok(sine),
            "cos" => Ok(cosine),
            "ln" => Ok(logarithm),
            _ => Err(InvalidOperator),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
    multiplication,
    division,
    exponentiation,
}

impl BinaryOperator {
    pub fn call(&self, left: f64, right: f64) -> Result<f64> {
        use BinaryOperator::*;

        match self {
            addition => Ok(left + right),
            subtraction => Ok(left - right),
            multiplication => Ok(left * right),
            division if right.abs() < EPSILON => Err(CalcError::division_by_zero),
            division => Ok(left / right),
            exponentiation => Ok(left.powf(right)),
        }
    }
}

impl TryFrom<char> for BinaryOperator {
    type Error = InvalidOperator;

    fn try_from(c: char) -> std::result::Result<Self, Self::Error> {
        use BinaryOperator::*;
        match c {
            '+' => Ok(addition),
            '-' => Ok(subtraction),
            '*' => Ok(multiplication),
            '/' => Ok(division),
            '^' => Ok(exponentiation),
            _ => Err(InvalidOperator),
        }
    }
}

/// One node of an evaluation tree. Trees are built once by [`parse`] and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    value(f64),
    variable(String),
    unary(UnaryOperator, Box<ExprNode>),
    binary(BinaryOperator, Box<ExprNode>, Box<ExprNode>),
}

/// Deepest tree the parser will build. Every split, group and function call
/// adds a level, so a sum of n terms needs n levels.
pub const DEPTH_LIMIT: usize = 256;

struct Split {
    index: usize,
    operator: BinaryOperator,
}

/// Picks the operator to split `expression` at.
///
/// The first `+` or `-` at depth 0 wins outright. Otherwise the first `*` or `/`
/// wins, unless a `^` came before it, in which case that `^` gives way to the
/// first `*` or `/` seen after it. A lone run of `^` splits at the first one,
/// so `2^2^3` is `2^(2^3)`.
fn find_split(expression: &str) -> Result<Option<Split>> {
    use BinaryOperator::*;

    let mut chosen: Option<Split> = None;
    let mut scanner = BalanceScanner::new(expression);
    for Position{index, character, depth} in scanner.by_ref() {
        if depth < 0 {
            return Err(CalcError::unbalanced_parentheses(expression.into()));
        }
        if depth != 0 || !is_operator(character) {
            continue;
        }
        let Ok(operator) = BinaryOperator::try_from(character) else {
            continue;
        };
        match operator {
            addition | subtraction => return Ok(Some(Split{index, operator})),
            multiplication | division => {
                if chosen.as_ref().map_or(true, |split| split.operator == exponentiation) {
                    chosen = Some(Split{index, operator});
                }
            },
            exponentiation => {
                if chosen.is_none() {
                    chosen = Some(Split{index, operator});
                }
            },
        }
    }
    if scanner.depth() != 0 {
        return Err(CalcError::unbalanced_parentheses(expression.into()));
    }
    Ok(chosen)
}

fn parse_call(expression: &str, depth: usize) -> Result<Option<ExprNode>> {
    let Some(name) = leading_identifier(expression) else {
        return Ok(None);
    };
    let open = name.len();
    if !expression[open..].starts_with('(') || find_closing(expression, open) != Some(expression.len() - 1) {
        return Ok(None);
    }

    let Ok(operator) = name.parse::<UnaryOperator>() else {
        return Err(CalcError::undeclared_function(name.into()));
    };
    let argument = parse_stripped(&expression[open + 1..expression.len() - 1], depth + 1)?;
    Ok(Some(ExprNode::unary(operator, Box::new(argument))))
}

fn parse_stripped(expression: &str, depth: usize) -> Result<ExprNode> {
    if depth > DEPTH_LIMIT {
        return Err(CalcError::too_deep(DEPTH_LIMIT));
    }

    if expression.is_empty() {
        return Err(CalcError::unrecognized(expression.into()));
    }

    if is_wrapped(expression) {
        return parse_stripped(&expression[1..expression.len() - 1], depth + 1);
    }

    if is_number(expression) {
        return expression.parse()
            .map(ExprNode::value)
            .map_err(|_| CalcError::unrecognized(expression.into()));
    }

    if is_identifier(expression) {
        return Ok(ExprNode::variable(expression.into()));
    }

    if let Some(Split{index, operator}) = find_split(expression)? {
        trace!(expression, index, ?operator, "splitting");
        let left = parse_stripped(&expression[..index], depth + 1)?;
        let right = parse_stripped(&expression[index + 1..], depth + 1)?;
        return Ok(ExprNode::binary(operator, Box::new(left), Box::new(right)));
    }

    if let Some(call) = parse_call(expression, depth)? {
        return Ok(call);
    }

    Err(CalcError::unrecognized(expression.into()))
}

/// Builds an evaluation tree out of `expression`. Whitespace is ignored.
pub fn parse(expression: &str) -> Result<ExprNode> {
    parse_stripped(&strip_whitespace(expression), 0)
}
