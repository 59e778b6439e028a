//! Domain layer: the expression tree and everything computed from it
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod arena;
pub mod error;
pub mod expr;
pub mod iter;
pub mod samples;
pub mod traversal;

pub use arena::{ArenaNode, ExprArena, NodeKind};
pub use error::{ExprError, ExprResult};
pub use expr::{DivisionMode, Expr, Operator};
pub use iter::{InOrderIter, LevelOrderIter, PostOrderIter, PreOrderIter};
pub use samples::Sample;
pub use traversal::{format_tokens, Order, Token, Visitor};
