//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::expr::Operator;

/// Errors raised while building or evaluating an expression tree.
///
/// All of them are local to the call that produced them: trees are immutable,
/// so a failed evaluation leaves nothing behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExprError {
    #[error("division by zero: {dividend} / 0")]
    DivisionByZero { dividend: i64 },

    #[error("invalid node: {0}")]
    InvalidNode(String),

    #[error("arithmetic overflow: {left} {op} {right}")]
    Overflow { op: Operator, left: i64, right: i64 },
}

/// Result type for expression tree operations.
pub type ExprResult<T> = Result<T, ExprError>;
