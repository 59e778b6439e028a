//! Lazy traversal iterators.
//!
//! Explicit stack or queue per order, so depth is bounded by the heap rather
//! than the call stack, and callers can stop early or chain adapters. Each
//! iterator is a single fresh pass starting at the node it was created from.

use std::collections::VecDeque;

use crate::domain::expr::Expr;
use crate::domain::traversal::Token;

impl Expr {
    pub fn iter_pre_order(&self) -> PreOrderIter<'_> {
        PreOrderIter::new(self)
    }

    pub fn iter_in_order(&self) -> InOrderIter<'_> {
        InOrderIter::new(self)
    }

    pub fn iter_post_order(&self) -> PostOrderIter<'_> {
        PostOrderIter::new(self)
    }

    pub fn iter_level_order(&self) -> LevelOrderIter<'_> {
        LevelOrderIter::new(self)
    }
}

pub struct PreOrderIter<'a> {
    stack: Vec<&'a Expr>,
}

impl<'a> PreOrderIter<'a> {
    fn new(root: &'a Expr) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for PreOrderIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some((left, right)) = node.children() {
            // Right first so the left subtree is popped next
            self.stack.push(right);
            self.stack.push(left);
        }
        Some(Token::of(node))
    }
}

pub struct InOrderIter<'a> {
    stack: Vec<&'a Expr>,
    current: Option<&'a Expr>,
}

impl<'a> InOrderIter<'a> {
    fn new(root: &'a Expr) -> Self {
        Self {
            stack: Vec::new(),
            current: Some(root),
        }
    }
}

impl<'a> Iterator for InOrderIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        // Descend along left edges, remembering the path
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = node.children().map(|(left, _)| left);
        }
        let node = self.stack.pop()?;
        self.current = node.children().map(|(_, right)| right);
        Some(Token::of(node))
    }
}

pub struct PostOrderIter<'a> {
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> PostOrderIter<'a> {
    fn new(root: &'a Expr) -> Self {
        Self {
            stack: vec![(root, false)],
        }
    }
}

impl<'a> Iterator for PostOrderIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, expanded)) = self.stack.pop() {
            match node.children() {
                Some((left, right)) if !expanded => {
                    self.stack.push((node, true));
                    self.stack.push((right, false));
                    self.stack.push((left, false));
                }
                _ => return Some(Token::of(node)),
            }
        }
        None
    }
}

pub struct LevelOrderIter<'a> {
    queue: VecDeque<&'a Expr>,
}

impl<'a> LevelOrderIter<'a> {
    fn new(root: &'a Expr) -> Self {
        Self {
            queue: VecDeque::from([root]),
        }
    }
}

impl<'a> Iterator for LevelOrderIter<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        if let Some((left, right)) = node.children() {
            self.queue.push_back(left);
            self.queue.push_back(right);
        }
        Some(Token::of(node))
    }
}
