use crate::keys::Key;
use crate::node::Node;

type IterEntry<'a, V> = (u8, &'a Node<V>);
type NodeIterator<'a, V> = dyn Iterator<Item = IterEntry<'a, V>> + 'a;

/// Ascending-order iterator over the entries of an
/// [`AdaptiveRadixTree`](crate::tree::AdaptiveRadixTree).
pub struct Iter<'a, V> {
    // Only set when the whole tree is a single leaf.
    root_leaf: Option<&'a Node<V>>,
    node_iter_stack: Vec<Box<NodeIterator<'a, V>>>,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(crate) fn new(root: Option<&'a Node<V>>, len: usize) -> Self {
        let Some(root) = root else {
            return Self {
                root_leaf: None,
                node_iter_stack: Vec::new(),
                remaining: 0,
            };
        };
        if root.is_leaf() {
            return Self {
                root_leaf: Some(root),
                node_iter_stack: Vec::new(),
                remaining: len,
            };
        }
        Self {
            root_leaf: None,
            node_iter_stack: vec![root.iter()],
            remaining: len,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a Key, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(leaf) = self.root_leaf.take().and_then(Node::leaf) {
            self.remaining -= 1;
            return Some((leaf.key(), leaf.value()));
        }

        // Depth-first walk. Each node yields its children in key-byte order, so leaves come out
        // sorted. Exhausted child iterators are popped; inner nodes push their own.
        loop {
            let last_iter = self.node_iter_stack.last_mut()?;

            let Some((_k, node)) = last_iter.next() else {
                self.node_iter_stack.pop();
                continue;
            };

            if let Some(leaf) = node.leaf() {
                self.remaining -= 1;
                return Some((leaf.key(), leaf.value()));
            }
            self.node_iter_stack.push(node.iter());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
