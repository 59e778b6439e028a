use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::{ExprError, ExprResult};
use crate::domain::expr::{DivisionMode, Expr, Operator};

/// Payload of an arena node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Operand(i64),
    Operator {
        op: Operator,
        left: Index,
        right: Index,
    },
}

/// Expression node stored in an [`ExprArena`].
#[derive(Debug)]
pub struct ArenaNode {
    pub kind: NodeKind,
    /// Index of the owning operator node, None while unattached
    pub parent: Option<Index>,
}

/// Index-addressed storage for expression trees.
///
/// Nodes are inserted bottom-up: leaves first, then operators referring to
/// existing handles. A node can be attached to at most one parent, which keeps
/// every stored structure a tree.
#[derive(Debug)]
pub struct ExprArena {
    arena: Arena<ArenaNode>,
}

impl Default for ExprArena {
    fn default() -> Self {
        Self::new()
    }
}

impl ExprArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_leaf(&mut self, value: i64) -> Index {
        self.arena.insert(ArenaNode {
            kind: NodeKind::Operand(value),
            parent: None,
        })
    }

    /// Inserts an operator node owning `left` and `right`.
    ///
    /// Fails with `InvalidNode` if a handle is dangling, both handles are the
    /// same node, or a child already belongs to another operator.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_operator(
        &mut self,
        op: Operator,
        left: Index,
        right: Index,
    ) -> ExprResult<Index> {
        if left == right {
            return Err(ExprError::InvalidNode(format!(
                "operator '{op}' uses the same node as both children"
            )));
        }
        for child in [left, right] {
            let node = self.node(child)?;
            if let Some(parent) = node.parent {
                return Err(ExprError::InvalidNode(format!(
                    "node {child:?} is already a child of {parent:?}"
                )));
            }
        }

        Ok(self.attach(op, left, right))
    }

    fn attach(&mut self, op: Operator, left: Index, right: Index) -> Index {
        let idx = self.arena.insert(ArenaNode {
            kind: NodeKind::Operator { op, left, right },
            parent: None,
        });
        for child in [left, right] {
            if let Some(node) = self.arena.get_mut(child) {
                node.parent = Some(idx);
            }
        }
        idx
    }

    pub fn get(&self, idx: Index) -> Option<&ArenaNode> {
        self.arena.get(idx)
    }

    fn node(&self, idx: Index) -> ExprResult<&ArenaNode> {
        self.arena
            .get(idx)
            .ok_or_else(|| ExprError::InvalidNode(format!("no node at {idx:?}")))
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|node| node.parent)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Nodes not owned by any operator, i.e. the roots of the stored trees.
    pub fn roots(&self) -> Vec<Index> {
        self.arena
            .iter()
            .filter(|(_, node)| node.parent.is_none())
            .map(|(idx, _)| idx)
            .collect()
    }

    pub fn evaluate(&self, idx: Index) -> ExprResult<i64> {
        self.evaluate_with(idx, DivisionMode::Truncate)
    }

    #[instrument(level = "trace", skip(self))]
    pub fn evaluate_with(&self, idx: Index, mode: DivisionMode) -> ExprResult<i64> {
        match self.node(idx)?.kind {
            NodeKind::Operand(value) => Ok(value),
            NodeKind::Operator { op, left, right } => {
                let lhs = self.evaluate_with(left, mode)?;
                let rhs = self.evaluate_with(right, mode)?;
                op.apply(lhs, rhs, mode)
            }
        }
    }

    /// Materializes the subtree rooted at `idx` as an owned [`Expr`].
    pub fn to_expr(&self, idx: Index) -> ExprResult<Expr> {
        match self.node(idx)?.kind {
            NodeKind::Operand(value) => Ok(Expr::leaf(value)),
            NodeKind::Operator { op, left, right } => Ok(Expr::internal(
                op,
                self.to_expr(left)?,
                self.to_expr(right)?,
            )),
        }
    }
}

impl Expr {
    /// Copies the tree into a fresh arena, returning the arena and the root handle.
    pub fn to_arena(&self) -> (ExprArena, Index) {
        let mut arena = ExprArena::new();
        let root = arena.push_expr(self);
        (arena, root)
    }
}

impl ExprArena {
    /// Inserts a whole owned tree bottom-up and returns its root handle.
    pub fn push_expr(&mut self, expr: &Expr) -> Index {
        match expr {
            Expr::Operand(value) => self.insert_leaf(*value),
            Expr::Operator { op, left, right } => {
                let left = self.push_expr(left);
                let right = self.push_expr(right);
                self.attach(*op, left, right)
            }
        }
    }
}
