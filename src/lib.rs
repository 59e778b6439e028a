//! Binary expression trees over `i64`.
//!
//! An [`Expr`] is either an operand or an operator owning two subtrees. It
//! can be evaluated with checked arithmetic, rendered fully parenthesized and
//! walked in preorder, inorder, postorder or level order.
//!
//! ```
//! use exprtree::{Expr, Order, format_tokens};
//!
//! let expr = Expr::div(
//!     Expr::mul(
//!         Expr::add(Expr::leaf(4), Expr::leaf(3)),
//!         Expr::sub(Expr::leaf(10), Expr::leaf(5)),
//!     ),
//!     Expr::leaf(2),
//! );
//! assert_eq!(expr.to_string(), "(((4 + 3) * (10 - 5)) / 2)");
//! assert_eq!(expr.evaluate(), Ok(17));
//! assert_eq!(
//!     format_tokens(&expr.tokens(Order::PostOrder), " "),
//!     "4 3 + 10 5 - * 2 /"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod tree_traits;
pub mod util;

pub use domain::{
    format_tokens, DivisionMode, Expr, ExprArena, ExprError, ExprResult, Operator, Order, Sample,
    Token, Visitor,
};
