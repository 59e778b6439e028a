//! Expression tree: a node is either an integer operand or a binary operator
//! owning exactly two subtrees.
//!
//! Walks over a tree use an explicit stack or queue, so arbitrarily deep trees
//! never exhaust the call stack.

use std::fmt;
use std::mem;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::domain::error::{ExprError, ExprResult};
use crate::domain::traversal::Token;

/// The four supported arithmetic operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    /// Combines two already evaluated operands.
    ///
    /// Overflow and division by zero are reported as errors instead of
    /// wrapping or panicking.
    pub fn apply(self, left: i64, right: i64, mode: DivisionMode) -> ExprResult<i64> {
        let overflow = || ExprError::Overflow {
            op: self,
            left,
            right,
        };
        match self {
            Operator::Add => left.checked_add(right).ok_or_else(overflow),
            Operator::Subtract => left.checked_sub(right).ok_or_else(overflow),
            Operator::Multiply => left.checked_mul(right).ok_or_else(overflow),
            Operator::Divide => {
                if right == 0 {
                    return Err(ExprError::DivisionByZero { dividend: left });
                }
                mode.divide(left, right).ok_or_else(overflow)
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<char> for Operator {
    type Error = ExprError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == symbol)
            .ok_or_else(|| ExprError::InvalidNode(format!("unknown operator '{symbol}'")))
    }
}

impl FromStr for Operator {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Operator::try_from(c),
            _ => Err(ExprError::InvalidNode(format!("unknown operator '{s}'"))),
        }
    }
}

/// Integer division semantics.
///
/// `Truncate` rounds toward zero (native `/`), `Floor` rounds toward negative
/// infinity. They only differ when the operands have mixed signs and the
/// division is inexact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DivisionMode {
    #[default]
    Truncate,
    Floor,
}

impl DivisionMode {
    /// Returns `None` on overflow (`i64::MIN / -1`). Caller guarantees `right != 0`.
    fn divide(self, left: i64, right: i64) -> Option<i64> {
        let quotient = left.checked_div(right)?;
        match self {
            DivisionMode::Truncate => Some(quotient),
            DivisionMode::Floor => {
                let inexact = left % right != 0;
                if inexact && ((left < 0) != (right < 0)) {
                    quotient.checked_sub(1)
                } else {
                    Some(quotient)
                }
            }
        }
    }
}

impl fmt::Display for DivisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DivisionMode::Truncate => write!(f, "truncate"),
            DivisionMode::Floor => write!(f, "floor"),
        }
    }
}

/// Binary expression tree node.
///
/// Children are owned by their parent, so the structure is always a tree and
/// an operator node can never be missing a child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Operand(i64),
    Operator {
        op: Operator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn leaf(value: i64) -> Self {
        Expr::Operand(value)
    }

    pub fn internal(op: Operator, left: Expr, right: Expr) -> Self {
        Expr::Operator {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Builds an operator node from its textual symbol, rejecting anything
    /// other than `+ - * /`.
    pub fn from_symbol(symbol: &str, left: Expr, right: Expr) -> ExprResult<Self> {
        let op = symbol.parse::<Operator>()?;
        Ok(Expr::internal(op, left, right))
    }

    pub fn add(left: Expr, right: Expr) -> Self {
        Expr::internal(Operator::Add, left, right)
    }

    pub fn sub(left: Expr, right: Expr) -> Self {
        Expr::internal(Operator::Subtract, left, right)
    }

    pub fn mul(left: Expr, right: Expr) -> Self {
        Expr::internal(Operator::Multiply, left, right)
    }

    pub fn div(left: Expr, right: Expr) -> Self {
        Expr::internal(Operator::Divide, left, right)
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Expr::Operator { .. })
    }

    /// Left and right child of an operator node, `None` for operands.
    pub fn children(&self) -> Option<(&Expr, &Expr)> {
        match self {
            Expr::Operand(_) => None,
            Expr::Operator { left, right, .. } => Some((&**left, &**right)),
        }
    }

    /// Evaluates the tree with truncating division.
    pub fn evaluate(&self) -> ExprResult<i64> {
        self.evaluate_with(DivisionMode::Truncate)
    }

    /// Postorder stack evaluation: left subtree, right subtree, then the
    /// operator, so the first failing subtree from the left decides the error.
    #[instrument(level = "trace", skip(self))]
    pub fn evaluate_with(&self, mode: DivisionMode) -> ExprResult<i64> {
        let mut values: Vec<i64> = Vec::new();
        for token in self.iter_post_order() {
            match token {
                Token::Operand(value) => values.push(value),
                Token::Operator(op) => {
                    let (Some(rhs), Some(lhs)) = (values.pop(), values.pop()) else {
                        return Err(ExprError::InvalidNode(format!(
                            "operator '{op}' is missing an operand"
                        )));
                    };
                    let value = op.apply(lhs, rhs, mode)?;
                    trace!(%op, lhs, rhs, value, "combined");
                    values.push(value);
                }
            }
        }
        values
            .pop()
            .ok_or_else(|| ExprError::InvalidNode("empty expression".into()))
    }

    /// Number of nodes on the longest root-to-leaf path; a single leaf has depth 1.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            if let Some((left, right)) = node.children() {
                stack.push((right, level + 1));
                stack.push((left, level + 1));
            }
        }
        deepest
    }

    pub fn node_count(&self) -> usize {
        self.iter_pre_order().count()
    }

    /// Operand values from left to right.
    pub fn operands(&self) -> Vec<i64> {
        self.iter_pre_order()
            .filter_map(|token| match token {
                Token::Operand(value) => Some(value),
                Token::Operator(_) => None,
            })
            .collect()
    }

    /// Moves both children out, leaving operand placeholders behind.
    fn take_children(&mut self, into: &mut Vec<Expr>) {
        if let Expr::Operator { left, right, .. } = self {
            into.push(mem::replace(left.as_mut(), Expr::Operand(0)));
            into.push(mem::replace(right.as_mut(), Expr::Operand(0)));
        }
    }
}

impl Drop for Expr {
    fn drop(&mut self) {
        // Detach subtrees iteratively; each popped node drops with operand children.
        let mut pending = Vec::new();
        self.take_children(&mut pending);
        while let Some(mut node) = pending.pop() {
            node.take_children(&mut pending);
        }
    }
}

enum Piece<'a> {
    Node(&'a Expr),
    Op(Operator),
    Close,
}

/// Fully parenthesized infix rendering: `(left op right)` for every operator node.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stack = vec![Piece::Node(self)];
        while let Some(piece) = stack.pop() {
            match piece {
                Piece::Node(Expr::Operand(value)) => write!(f, "{value}")?,
                Piece::Node(Expr::Operator { op, left, right }) => {
                    f.write_str("(")?;
                    stack.push(Piece::Close);
                    stack.push(Piece::Node(right.as_ref()));
                    stack.push(Piece::Op(*op));
                    stack.push(Piece::Node(left.as_ref()));
                }
                Piece::Op(op) => write!(f, " {op} ")?,
                Piece::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}

impl From<i64> for Expr {
    fn from(value: i64) -> Self {
        Expr::leaf(value)
    }
}
