/*
Structural display of expression trees via termtree.

Operator nodes become labeled branches with their two subtrees as leaves,
operands become plain leaves:

/
├── *
│   ├── +
│   │   ├── 4
│   │   └── 3
...
 */
use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::domain::{Expr, ExprArena, NodeKind, Token};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for Expr {
    #[instrument(level = "trace", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        let root = Token::of(self).to_string();
        match self.children() {
            None => Tree::new(root),
            Some((left, right)) => {
                Tree::new(root).with_leaves([left.to_tree_string(), right.to_tree_string()])
            }
        }
    }
}

// One branch per stored tree, under a synthetic "arena" root
impl TreeNodeConvert for ExprArena {
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(arena: &ExprArena, node_idx: Index) -> Tree<String> {
            match arena.get(node_idx).map(|node| node.kind) {
                Some(NodeKind::Operand(value)) => Tree::new(value.to_string()),
                Some(NodeKind::Operator { op, left, right }) => Tree::new(op.to_string())
                    .with_leaves([build_tree(arena, left), build_tree(arena, right)]),
                None => Tree::new("?".to_string()),
            }
        }

        if self.is_empty() {
            return Tree::new("Empty arena".to_string());
        }
        let leaves: Vec<_> = self
            .roots()
            .into_iter()
            .map(|root| build_tree(self, root))
            .collect();
        Tree::new("arena".to_string()).with_leaves(leaves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_operator_node_when_converting_then_children_become_leaves() {
        let expr = Expr::sub(Expr::leaf(10), Expr::leaf(5));
        let tree = expr.to_tree_string();
        assert_eq!(tree.root, "-");
        assert_eq!(tree.leaves.len(), 2);
        assert_eq!(tree.leaves[0].root, "10");
        assert_eq!(tree.leaves[1].root, "5");
    }

    #[test]
    fn given_arena_with_one_tree_when_converting_then_single_branch() {
        let (arena, _) = Expr::add(Expr::leaf(1), Expr::leaf(2)).to_arena();
        let tree = arena.to_tree_string();
        assert_eq!(tree.root, "arena");
        assert_eq!(tree.leaves.len(), 1);
        assert_eq!(tree.leaves[0].root, "+");
    }
}
