//! Generic AVL tree with explicit orderings.
//!
//! The tree never inspects its elements on its own. Insertion takes a
//! comparator between two elements; lookups and deletions take a key that
//! reports where the target lies relative to a visited element
//! (`Less` = descend left, `Greater` = descend right, `Equal` = found).
//! Duplicate keys are kept; an element comparing equal is placed to the right.

use std::cmp::Ordering;

type Link<T> = Option<Box<TreeNode<T>>>;

#[derive(Debug)]
struct TreeNode<T> {
    value: T,
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

impl<T> TreeNode<T> {
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self {
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    #[allow(clippy::cast_possible_wrap)]
    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn rotate_right<T>(mut node: Box<TreeNode<T>>) -> Box<TreeNode<T>> {
    match node.left.take() {
        Some(mut pivot) => {
            node.left = pivot.right.take();
            node.update_height();
            pivot.right = Some(node);
            pivot.update_height();
            pivot
        }
        None => node,
    }
}

fn rotate_left<T>(mut node: Box<TreeNode<T>>) -> Box<TreeNode<T>> {
    match node.right.take() {
        Some(mut pivot) => {
            node.right = pivot.left.take();
            node.update_height();
            pivot.left = Some(node);
            pivot.update_height();
            pivot
        }
        None => node,
    }
}

fn rebalance<T>(mut node: Box<TreeNode<T>>) -> Box<TreeNode<T>> {
    node.update_height();
    let bf = node.balance_factor();
    if bf > 1 {
        if node.left.as_ref().is_some_and(|l| l.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        rotate_right(node)
    } else if bf < -1 {
        if node.right.as_ref().is_some_and(|r| r.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        rotate_left(node)
    } else {
        node
    }
}

fn insert_node<T, F>(link: Link<T>, value: T, cmp: &F) -> Box<TreeNode<T>>
where
    F: Fn(&T, &T) -> Ordering,
{
    match link {
        None => TreeNode::leaf(value),
        Some(mut node) => {
            if cmp(&value, &node.value) == Ordering::Less {
                node.left = Some(insert_node(node.left.take(), value, cmp));
            } else {
                node.right = Some(insert_node(node.right.take(), value, cmp));
            }
            rebalance(node)
        }
    }
}

/// Detaches the minimum of a subtree, returning the remaining subtree and the value.
fn take_min<T>(mut node: Box<TreeNode<T>>) -> (Link<T>, T) {
    match node.left.take() {
        None => {
            let TreeNode { value, right, .. } = *node;
            (right, value)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), min)
        }
    }
}

fn delete_node<T, P>(link: Link<T>, key: &P, removed: &mut Option<T>) -> Link<T>
where
    P: Fn(&T) -> Ordering,
{
    let mut node = link?;
    match key(&node.value) {
        Ordering::Less => node.left = delete_node(node.left.take(), key, removed),
        Ordering::Greater => node.right = delete_node(node.right.take(), key, removed),
        Ordering::Equal => {
            let TreeNode {
                value, left, right, ..
            } = *node;
            *removed = Some(value);
            return match (left, right) {
                (None, only) | (only, None) => only,
                (Some(left), Some(right)) => {
                    // In-order successor takes the removed node's place.
                    let (rest, successor) = take_min(right);
                    let mut replacement = TreeNode::leaf(successor);
                    replacement.left = Some(left);
                    replacement.right = rest;
                    Some(rebalance(replacement))
                }
            };
        }
    }
    Some(rebalance(node))
}

fn check_balanced<T>(link: &Link<T>) -> Option<usize> {
    match link {
        None => Some(0),
        Some(node) => {
            let lh = check_balanced(&node.left)?;
            let rh = check_balanced(&node.right)?;
            let h = 1 + lh.max(rh);
            (lh.abs_diff(rh) <= 1 && h == node.height).then_some(h)
        }
    }
}

/// A self-balancing binary search tree.
#[derive(Debug)]
pub struct Tree<T> {
    root: Link<T>,
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self { root: None, len: 0 }
    }
}

impl<T> Tree<T> {
    /// Creates an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree holds no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree (0 when empty).
    #[must_use]
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Inserts `value`, ordered by `cmp`.
    pub fn insert<F>(&mut self, value: T, cmp: F)
    where
        F: Fn(&T, &T) -> Ordering,
    {
        self.root = Some(insert_node(self.root.take(), value, &cmp));
        self.len += 1;
    }

    /// Exact lookup.
    pub fn get<P>(&self, key: P) -> Option<&T>
    where
        P: Fn(&T) -> Ordering,
    {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key(&node.value) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Exact match, or the last element visited on the search path.
    pub fn get_closest<P>(&self, key: P) -> Option<&T>
    where
        P: Fn(&T) -> Ordering,
    {
        let mut cur = self.root.as_deref();
        let mut last = None;
        while let Some(node) = cur {
            last = Some(&node.value);
            match key(&node.value) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => break,
            }
        }
        last
    }

    /// Removes the element the key reports as equal.
    pub fn delete<P>(&mut self, key: P) -> Option<T>
    where
        P: Fn(&T) -> Ordering,
    {
        let mut removed = None;
        self.root = delete_node(self.root.take(), &key, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Removes and returns the minimum element.
    pub fn delete_min(&mut self) -> Option<T> {
        let root = self.root.take()?;
        let (rest, min) = take_min(root);
        self.root = rest;
        self.len -= 1;
        Some(min)
    }

    /// Returns the minimum element.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        let mut cur = self.root.as_deref()?;
        while let Some(left) = cur.left.as_deref() {
            cur = left;
        }
        Some(&cur.value)
    }

    /// In-order iterator.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Returns `true` if every node's subtrees differ in height by at most one
    /// and all cached heights are correct.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        check_balanced(&self.root).is_some()
    }
}

/// In-order iterator over a [`Tree`].
pub struct Iter<'a, T> {
    stack: Vec<&'a TreeNode<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut node: Option<&'a TreeNode<T>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some(&node.value)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn build(values: &[i32]) -> Tree<i32> {
        let mut tree = Tree::new();
        for &v in values {
            tree.insert(v, i32::cmp);
        }
        tree
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let values: Vec<i32> = (0..100).collect();
        let tree = build(&values);
        assert!(tree.is_balanced());
        assert!(tree.height() <= 8);
        assert_eq!(tree.len(), 100);
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), values);
    }

    #[test]
    fn lookup_and_closest() {
        let tree = build(&[10, 20, 30, 40, 50]);
        assert_eq!(tree.get(|n| 30.cmp(n)), Some(&30));
        assert_eq!(tree.get(|n| 35.cmp(n)), None);
        let closest = tree.get_closest(|n| 35.cmp(n)).copied();
        assert!(matches!(closest, Some(30 | 40)));
        assert_eq!(Tree::<i32>::new().get_closest(|n| 1.cmp(n)), None);
    }

    #[test]
    fn delete_min_drains_in_order() {
        let mut tree = build(&[5, 3, 8, 1, 4, 7, 9]);
        let mut drained = Vec::new();
        while let Some(v) = tree.delete_min() {
            assert!(tree.is_balanced());
            drained.push(v);
        }
        assert_eq!(drained, vec![1, 3, 4, 5, 7, 8, 9]);
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut tree = build(&[2, 2, 2, 1]);
        assert_eq!(tree.len(), 4);
        assert_eq!(tree.delete(|n| 2.cmp(n)), Some(2));
        assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 2]);
    }

    #[test]
    fn delete_node_with_two_children() {
        let mut tree = build(&[50, 30, 70, 20, 40, 60, 80]);
        assert_eq!(tree.delete(|n| 50.cmp(n)), Some(50));
        assert_eq!(tree.delete(|n| 55.cmp(n)), None);
        assert!(tree.is_balanced());
        assert_eq!(tree.min(), Some(&20));
        assert_eq!(
            tree.iter().copied().collect::<Vec<_>>(),
            vec![20, 30, 40, 60, 70, 80]
        );
    }

    proptest! {
        #[test]
        fn insert_delete_keeps_invariants(
            values in prop::collection::vec(-1000i32..1000, 0..200),
            removals in prop::collection::vec(-1000i32..1000, 0..100),
        ) {
            let mut tree = build(&values);
            let mut expected = values.clone();
            expected.sort_unstable();
            for r in removals {
                let removed = tree.delete(|n| r.cmp(n));
                if let Some(pos) = expected.iter().position(|&v| v == r) {
                    prop_assert_eq!(removed, Some(r));
                    expected.remove(pos);
                } else {
                    prop_assert_eq!(removed, None);
                }
                prop_assert!(tree.is_balanced());
            }
            prop_assert_eq!(tree.len(), expected.len());
            prop_assert_eq!(tree.iter().copied().collect::<Vec<_>>(), expected);
        }
    }
}
