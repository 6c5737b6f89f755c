use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("parentheses are unbalanced in '{0}'")]
    unbalanced_parentheses(String),

    #[error("could not parse '{0}'")]
    unrecognized(String),

    #[error("call to macro '{0}' is never closed")]
    unclosed_macro_call(String),

    #[error("incorrect syntax, '{0}'")]
    incorrect_syntax(String),

    #[error("expression nests deeper than {0} levels")]
    too_deep(usize),

    #[error("division by zero")]
    division_by_zero,

    #[error("invalid operation")]
    invalid_operation,

    #[error("identifier, '{0}', is not defined")]
    undefined(String),

    #[error("function, '{0}', is not declared")]
    undeclared_function(String),

    #[error("recursion limit reached after {0} macro expansions")]
    recursion_limit(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    parse,
    math,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        use CalcError::*;
        match self {
            unbalanced_parentheses(_) | unrecognized(_) | unclosed_macro_call(_) | incorrect_syntax(_) | too_deep(_) =>
                ErrorKind::parse,
            division_by_zero | invalid_operation | undefined(_) | undeclared_function(_) | recursion_limit(_) =>
                ErrorKind::math,
        }
    }
}

pub type Result<T> = std::result::Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(CalcError::unbalanced_parentheses("(1".into()).kind(), ErrorKind::parse);
        assert_eq!(CalcError::incorrect_syntax("a=b=c".into()).kind(), ErrorKind::parse);
        assert_eq!(CalcError::too_deep(256).kind(), ErrorKind::parse);
        assert_eq!(CalcError::undefined("y".into()).kind(), ErrorKind::math);
        assert_eq!(CalcError::recursion_limit(100).kind(), ErrorKind::math);
    }

    #[test]
    fn messages() {
        assert_eq!(CalcError::undefined("y".into()).to_string(), "identifier, 'y', is not defined");
        assert_eq!(CalcError::division_by_zero.to_string(), "division by zero");
    }
}
