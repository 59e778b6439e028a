//! Built-in expression trees used by the demonstration binary and tests.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::ExprError;
use crate::domain::expr::{Expr, Operator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sample {
    /// `((4 + 3) * (10 - 5)) / 2`
    #[default]
    Classic,
    /// A single operand `5`
    Leaf,
    /// `1 / 0`
    DivByZero,
    /// `(0 - 7) / 2`, rounds differently under truncating and floor division
    Negative,
}

impl Sample {
    pub const ALL: [Sample; 4] = [
        Sample::Classic,
        Sample::Leaf,
        Sample::DivByZero,
        Sample::Negative,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Sample::Classic => "classic",
            Sample::Leaf => "leaf",
            Sample::DivByZero => "div-by-zero",
            Sample::Negative => "negative",
        }
    }

    pub fn build(&self) -> Expr {
        match self {
            Sample::Classic => classic(),
            Sample::Leaf => Expr::leaf(5),
            Sample::DivByZero => Expr::div(Expr::leaf(1), Expr::leaf(0)),
            Sample::Negative => Expr::div(Expr::sub(Expr::leaf(0), Expr::leaf(7)), Expr::leaf(2)),
        }
    }
}

/// Builds `((4 + 3) * (10 - 5)) / 2` bottom-up from its leaves.
fn classic() -> Expr {
    let four = Expr::leaf(4);
    let three = Expr::leaf(3);
    let ten = Expr::leaf(10);
    let five = Expr::leaf(5);
    let two = Expr::leaf(2);

    let plus = Expr::internal(Operator::Add, four, three);
    let minus = Expr::internal(Operator::Subtract, ten, five);
    let times = Expr::internal(Operator::Multiply, plus, minus);
    Expr::internal(Operator::Divide, times, two)
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Sample {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Sample::ALL
            .into_iter()
            .find(|sample| sample.name() == s.trim())
            .ok_or_else(|| ExprError::InvalidNode(format!("unknown sample '{s}'")))
    }
}
