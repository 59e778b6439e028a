//! Depth-first and breadth-first walks over an expression tree.
//!
//! Every walk hands each node's value to a [`Visitor`] instead of printing it,
//! so the same walk drives console output, collection into a `Vec` or tests.
//! The walks are driven by the stack and queue iterators in `iter`.

use std::fmt;
use std::str::FromStr;

use itertools::Itertools;
use tracing::instrument;

use crate::domain::error::ExprError;
use crate::domain::expr::{Expr, Operator};

/// The value a traversal emits for one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Operator(Operator),
    Operand(i64),
}

impl Token {
    pub fn of(node: &Expr) -> Self {
        match node {
            Expr::Operand(value) => Token::Operand(*value),
            Expr::Operator { op, .. } => Token::Operator(*op),
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Token::Operator(_))
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Operator(op) => write!(f, "{op}"),
            Token::Operand(value) => write!(f, "{value}"),
        }
    }
}

/// Sink receiving the tokens of a traversal in emission order.
pub trait Visitor {
    fn visit(&mut self, token: Token);
}

impl<F: FnMut(Token)> Visitor for F {
    fn visit(&mut self, token: Token) {
        self(token)
    }
}

/// Traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    PreOrder,
    InOrder,
    PostOrder,
    LevelOrder,
}

impl Order {
    pub const ALL: [Order; 4] = [
        Order::PreOrder,
        Order::InOrder,
        Order::PostOrder,
        Order::LevelOrder,
    ];

    /// Human readable label used as output prefix.
    pub fn label(&self) -> &'static str {
        match self {
            Order::PreOrder => "Preorder",
            Order::InOrder => "In-order",
            Order::PostOrder => "Postorder",
            Order::LevelOrder => "Level-order",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::PreOrder => "pre",
            Order::InOrder => "in",
            Order::PostOrder => "post",
            Order::LevelOrder => "level",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Order {
    type Err = ExprError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre" | "preorder" | "pre-order" => Ok(Order::PreOrder),
            "in" | "inorder" | "in-order" => Ok(Order::InOrder),
            "post" | "postorder" | "post-order" => Ok(Order::PostOrder),
            "level" | "levelorder" | "level-order" => Ok(Order::LevelOrder),
            other => Err(ExprError::InvalidNode(format!(
                "unknown traversal order '{other}'"
            ))),
        }
    }
}

fn feed<V: Visitor + ?Sized>(tokens: impl Iterator<Item = Token>, visitor: &mut V) {
    for token in tokens {
        visitor.visit(token);
    }
}

impl Expr {
    /// Node, then left subtree, then right subtree.
    pub fn pre_order<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        feed(self.iter_pre_order(), visitor);
    }

    /// Left subtree, node, right subtree. Same token order as the rendering
    /// but without parentheses.
    pub fn in_order<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        feed(self.iter_in_order(), visitor);
    }

    /// Left subtree, right subtree, then node.
    pub fn post_order<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        feed(self.iter_post_order(), visitor);
    }

    /// Breadth-first: nodes of one depth before any node of the next, left
    /// to right per parent.
    pub fn level_order<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        feed(self.iter_level_order(), visitor);
    }

    #[instrument(level = "debug", skip(self, visitor))]
    pub fn traverse<V: Visitor + ?Sized>(&self, order: Order, visitor: &mut V) {
        match order {
            Order::PreOrder => self.pre_order(visitor),
            Order::InOrder => self.in_order(visitor),
            Order::PostOrder => self.post_order(visitor),
            Order::LevelOrder => self.level_order(visitor),
        }
    }

    pub fn tokens(&self, order: Order) -> Vec<Token> {
        let mut tokens: Vec<Token> = Vec::with_capacity(self.node_count());
        self.traverse(order, &mut |token: Token| tokens.push(token));
        tokens
    }

    pub fn pre_order_tokens(&self) -> Vec<Token> {
        self.tokens(Order::PreOrder)
    }

    pub fn in_order_tokens(&self) -> Vec<Token> {
        self.tokens(Order::InOrder)
    }

    pub fn post_order_tokens(&self) -> Vec<Token> {
        self.tokens(Order::PostOrder)
    }

    pub fn level_order_tokens(&self) -> Vec<Token> {
        self.tokens(Order::LevelOrder)
    }
}

/// Joins token displays with `separator`.
pub fn format_tokens(tokens: &[Token], separator: &str) -> String {
    tokens.iter().join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(expr: &Expr, order: Order) -> String {
        format_tokens(&expr.tokens(order), " ")
    }

    #[test]
    fn given_small_tree_when_traversing_then_orders_differ_in_operator_position() {
        let expr = Expr::sub(Expr::leaf(8), Expr::leaf(3));
        assert_eq!(render(&expr, Order::PreOrder), "- 8 3");
        assert_eq!(render(&expr, Order::InOrder), "8 - 3");
        assert_eq!(render(&expr, Order::PostOrder), "8 3 -");
        assert_eq!(render(&expr, Order::LevelOrder), "- 8 3");
    }

    #[test]
    fn given_closure_sink_when_traversing_then_receives_every_node() {
        let expr = Expr::add(Expr::leaf(1), Expr::mul(Expr::leaf(2), Expr::leaf(3)));
        let mut seen = 0;
        expr.post_order(&mut |_token: Token| seen += 1);
        assert_eq!(seen, 5);
    }

    #[test]
    fn given_order_names_when_parsing_then_accepts_aliases() {
        assert_eq!("pre".parse::<Order>().unwrap(), Order::PreOrder);
        assert_eq!("In-Order".parse::<Order>().unwrap(), Order::InOrder);
        assert_eq!("postorder".parse::<Order>().unwrap(), Order::PostOrder);
        assert_eq!("level".parse::<Order>().unwrap(), Order::LevelOrder);
        assert!("sideways".parse::<Order>().is_err());
    }

    #[test]
    fn given_negative_operand_when_formatting_then_keeps_sign() {
        let tokens = vec![Token::Operand(-4), Token::Operator(Operator::Divide)];
        assert_eq!(format_tokens(&tokens, ","), "-4,/");
    }
}
