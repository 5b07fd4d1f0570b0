use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::fmt;

use crate::error::TreeError;

/// An ordered set of unique elements kept in an AVL tree.
///
/// Elements can be inserted, looked up and traversed. Removal is not
/// supported and always returns [`TreeError::UnsupportedOperation`].
///
/// ```
/// use avl_vocab::AvlTree;
/// let mut tree = AvlTree::new();
/// tree.insert("def");
/// tree.insert("abc");
/// tree.insert("xyz");
/// assert_eq!(tree.find(&"abc"), Some(&"abc"));
/// assert!(tree.remove(&"abc").is_err());
/// assert_eq!(tree.inorder().collect::<Vec<_>>(), [&"abc", &"def", &"xyz"]);
/// ```
#[derive(Clone)]
pub struct AvlTree<T> {
    root: Link<T>,
    num_nodes: usize,
}

/// A read-only handle to a node of an [`AvlTree`].
#[derive(Clone)]
pub struct Node<T> {
    element: T,
    left: Link<T>,
    right: Link<T>,
    height: i32,
}

/// Classical depth-first traversal orders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Left subtree, node, right subtree (ascending).
    Inorder,
    /// Node, left subtree, right subtree.
    Preorder,
    /// Left subtree, right subtree, node.
    Postorder,
}

/// An iterator over the elements of a tree in a given [`Order`].
pub struct Traverse<'a, T> {
    order: Order,
    stack: Vec<(&'a Node<T>, Direction)>,
    remaining: usize,
}

type Link<T> = Option<Box<Node<T>>>;

// Where the walk arrived at a node from.
#[allow(clippy::enum_variant_names)]
#[derive(Clone, Copy)]
enum Direction {
    FromParent,
    FromLeft,
    FromRight,
}

impl<T: Ord> AvlTree<T> {
    /// Creates an empty tree.
    /// No memory is allocated until the first element is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Inserts an element into the tree.
    /// Returns false (and leaves the tree untouched) if an equal element is already present.
    pub fn insert(&mut self, element: T) -> bool {
        let mut inserted = false;
        self.root = Some(Node::insert(self.root.take(), element, &mut inserted));
        if inserted {
            self.num_nodes += 1;
        } else {
            tracing::debug!(len = self.num_nodes, "duplicate insert ignored");
        }
        inserted
    }

    /// Removing elements is not supported.
    /// Always fails with [`TreeError::UnsupportedOperation`], whether or not the element is present.
    pub fn remove<Q>(&mut self, _element: &Q) -> Result<(), TreeError>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        tracing::warn!(len = self.num_nodes, "rejected remove on avl tree");
        Err(TreeError::UnsupportedOperation {
            operation: "remove",
        })
    }

    /// Returns a reference to the element in the tree that is equal to the given value.
    ///
    /// The value may be any borrowed form of the element type, but the ordering
    /// on the borrowed form *must* match the ordering on the element type.
    pub fn find<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).map(Node::element)
    }

    /// Returns the node holding the element equal to the given value.
    pub fn find_node<Q>(&self, value: &Q) -> Option<&Node<T>>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match value.cmp(node.element.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            };
        }
        current
    }

    /// Returns true if the tree holds an element equal to the given value.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_node(value).is_some()
    }
}

impl<T> AvlTree<T> {
    /// Returns true if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the root node, or -1 if the tree is empty.
    pub fn height(&self) -> i32 {
        height(&self.root)
    }

    /// Clears the tree, deallocating all nodes.
    pub fn make_empty(&mut self) {
        self.root = None;
        self.num_nodes = 0;
    }

    /// Returns the root node, if any.
    pub fn root(&self) -> Option<&Node<T>> {
        self.root.as_deref()
    }

    /// Returns the smallest element.
    pub fn find_min(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.element)
    }

    /// Returns the largest element.
    pub fn find_max(&self) -> Option<&T> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.element)
    }

    /// Gets an iterator over the elements in ascending order.
    pub fn iter(&self) -> Traverse<'_, T> {
        self.inorder()
    }

    /// Gets an iterator visiting left subtree, node, right subtree.
    pub fn inorder(&self) -> Traverse<'_, T> {
        self.traverse(Order::Inorder)
    }

    /// Gets an iterator visiting node, left subtree, right subtree.
    pub fn preorder(&self) -> Traverse<'_, T> {
        self.traverse(Order::Preorder)
    }

    /// Gets an iterator visiting left subtree, right subtree, node.
    pub fn postorder(&self) -> Traverse<'_, T> {
        self.traverse(Order::Postorder)
    }

    /// Gets an iterator over the elements in the given order.
    /// Each call starts a fresh walk from the root.
    pub fn traverse(&self, order: Order) -> Traverse<'_, T> {
        let mut stack = Vec::with_capacity(cmp::max(self.height(), 0) as usize + 1);
        if let Some(root) = self.root.as_deref() {
            stack.push((root, Direction::FromParent));
        }
        Traverse {
            order,
            stack,
            remaining: self.num_nodes,
        }
    }

    /// Asserts BST order, height bookkeeping, AVL balance and the node count.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self)
    where
        T: Ord,
    {
        fn check<T: Ord>(link: &Link<T>, num_nodes: &mut usize) -> i32 {
            let Some(node) = link.as_deref() else {
                return -1;
            };

            // Check ordering against direct children
            if let Some(left) = node.left.as_deref() {
                assert!(left.element < node.element);
            }
            if let Some(right) = node.right.as_deref() {
                assert!(right.element > node.element);
            }

            let left_height = check(&node.left, num_nodes);
            let right_height = check(&node.right, num_nodes);

            // Check height
            assert_eq!(node.height, cmp::max(left_height, right_height) + 1);

            // Check AVL condition (nearly balance)
            assert!((left_height - right_height).abs() <= 1);

            *num_nodes += 1;
            node.height
        }

        let mut num_nodes = 0;
        check(&self.root, &mut num_nodes);
        assert_eq!(num_nodes, self.num_nodes);

        // Child comparisons alone miss grandchildren on the wrong side,
        // so also require the inorder walk to be strictly ascending.
        let mut prev: Option<&T> = None;
        for element in self.inorder() {
            if let Some(prev) = prev {
                assert!(prev < element);
            }
            prev = Some(element);
        }
    }
}

impl<T: Ord> Node<T> {
    fn leaf(element: T) -> Box<Self> {
        Box::new(Node {
            element,
            left: None,
            right: None,
            height: 0,
        })
    }

    // Inserts into the subtree rooted at `link` and returns its new root.
    fn insert(link: Link<T>, element: T, inserted: &mut bool) -> Box<Self> {
        let mut node = match link {
            None => {
                *inserted = true;
                return Self::leaf(element);
            }
            Some(node) => node,
        };

        match element.cmp(&node.element) {
            Ordering::Less => {
                // A rotation below never leaves the left subtree taller, so when this
                // node ends up out of balance its left child is the one compared here.
                let outside = node
                    .left
                    .as_ref()
                    .is_some_and(|left| element < left.element);
                node.left = Some(Self::insert(node.left.take(), element, inserted));
                if height(&node.left) - height(&node.right) == 2 {
                    node = if outside {
                        Self::rotate_with_left_child(node)
                    } else {
                        Self::double_with_left_child(node)
                    };
                }
            }
            Ordering::Greater => {
                let outside = node
                    .right
                    .as_ref()
                    .is_some_and(|right| element > right.element);
                node.right = Some(Self::insert(node.right.take(), element, inserted));
                if height(&node.right) - height(&node.left) == 2 {
                    node = if outside {
                        Self::rotate_with_right_child(node)
                    } else {
                        Self::double_with_right_child(node)
                    };
                }
            }
            Ordering::Equal => return node,
        }

        node.adjust_height();
        node
    }
}

impl<T> Node<T> {
    /// Returns the element held by this node.
    pub fn element(&self) -> &T {
        &self.element
    }

    pub fn left(&self) -> Option<&Node<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&Node<T>> {
        self.right.as_deref()
    }

    /// Returns the height of this node; a leaf has height 0.
    pub fn height(&self) -> i32 {
        self.height
    }

    fn adjust_height(&mut self) {
        self.height = cmp::max(height(&self.left), height(&self.right)) + 1;
    }

    //     k2        k1
    //    /  \      /  \
    //   k1   C -> A   k2
    //  /  \          /  \
    // A    B        B    C
    fn rotate_with_left_child(mut k2: Box<Self>) -> Box<Self> {
        let Some(mut k1) = k2.left.take() else {
            return k2;
        };
        tracing::trace!(height = k2.height, "rotate with left child");
        k2.left = k1.right.take();
        k2.adjust_height();
        k1.right = Some(k2);
        k1.adjust_height();
        k1
    }

    //   k1            k2
    //  /  \          /  \
    // A    k2   ->  k1   C
    //     /  \     /  \
    //    B    C   A    B
    fn rotate_with_right_child(mut k1: Box<Self>) -> Box<Self> {
        let Some(mut k2) = k1.right.take() else {
            return k1;
        };
        tracing::trace!(height = k1.height, "rotate with right child");
        k1.right = k2.left.take();
        k1.adjust_height();
        k2.left = Some(k1);
        k2.adjust_height();
        k2
    }

    // Left child's right subtree moves up twice.
    fn double_with_left_child(mut k3: Box<Self>) -> Box<Self> {
        tracing::trace!(height = k3.height, "double rotate with left child");
        k3.left = k3.left.take().map(Self::rotate_with_right_child);
        Self::rotate_with_left_child(k3)
    }

    // Right child's left subtree moves up twice.
    fn double_with_right_child(mut k1: Box<Self>) -> Box<Self> {
        tracing::trace!(height = k1.height, "double rotate with right child");
        k1.right = k1.right.take().map(Self::rotate_with_left_child);
        Self::rotate_with_right_child(k1)
    }
}

fn height<T>(link: &Link<T>) -> i32 {
    match link {
        None => -1,
        Some(node) => node.height,
    }
}

impl<'a, T> Iterator for Traverse<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((node, dir)) = self.stack.pop() {
            let visit = match dir {
                Direction::FromParent => {
                    self.stack.push((node, Direction::FromLeft));
                    if let Some(left) = node.left.as_deref() {
                        self.stack.push((left, Direction::FromParent));
                    }
                    self.order == Order::Preorder
                }
                Direction::FromLeft => {
                    self.stack.push((node, Direction::FromRight));
                    if let Some(right) = node.right.as_deref() {
                        self.stack.push((right, Direction::FromParent));
                    }
                    self.order == Order::Inorder
                }
                Direction::FromRight => self.order == Order::Postorder,
            };
            if visit {
                self.remaining -= 1;
                return Some(&node.element);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> ExactSizeIterator for Traverse<'a, T> {}

impl<'a, T> std::iter::FusedIterator for Traverse<'a, T> {}

impl<'a, T> IntoIterator for &'a AvlTree<T> {
    type Item = &'a T;
    type IntoIter = Traverse<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Ord> Default for AvlTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Extend<T> for AvlTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: Ord> FromIterator<T> for AvlTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Debug> fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("element", &self.element)
            .field("height", &self.height)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

/// Prints "Empty tree", or one element per line in ascending order.
impl<T: fmt::Display> fmt::Display for AvlTree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Empty tree");
        }
        for element in self.iter() {
            writeln!(f, "{element}")?;
        }
        Ok(())
    }
}
