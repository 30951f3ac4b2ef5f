use core::cmp::Ordering;
use core::mem;

use alloc::vec::Vec;
use log::{debug, trace};

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Color, Node, Side};
use super::traversal::InOrder;

/// The red-black tree backing `RBTreeMap`.
///
/// Keys are never compared here directly. Every search takes a `probe` closure that
/// answers how the sought key orders against a node's key, which keeps the
/// comparator choice entirely in the public layer.
#[derive(Clone)]
pub(crate) struct RawRBTreeMap<K, V> {
    /// Arena owning every linked node.
    nodes: Arena<Node<K, V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// Result of descending the tree for a key.
pub(crate) enum SearchResult {
    /// Key was found at the given node.
    Found(Handle),
    /// Key was not found; a new node for it belongs under `parent` on `side`.
    NotFound { parent: Option<Handle>, side: Side },
}

impl<K, V> RawRBTreeMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn clear(&mut self) {
        debug!("clearing tree of {} nodes", self.nodes.len());
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node<K, V> {
        self.nodes.get(handle)
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node<K, V> {
        self.nodes.get_mut(handle)
    }

    pub(crate) fn key(&self, handle: Handle) -> &K {
        &self.node(handle).key
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        &mut self.node_mut(handle).value
    }

    pub(crate) fn key_value(&self, handle: Handle) -> (&K, &V) {
        let node = self.node(handle);
        (&node.key, &node.value)
    }

    pub(crate) fn key_value_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.node_mut(handle);
        (&node.key, &mut node.value)
    }

    /// Returns the number of edges on the longest root-to-leaf path, or `None` if empty.
    pub(crate) fn height(&self) -> Option<usize> {
        self.root.map(|root| self.subtree_height(root))
    }

    fn subtree_height(&self, handle: Handle) -> usize {
        let node = self.node(handle);
        let left = node.left.map_or(0, |left| 1 + self.subtree_height(left));
        let right = node.right.map_or(0, |right| 1 + self.subtree_height(right));
        left.max(right)
    }

    /// Returns the leftmost (`Side::Left`) or rightmost (`Side::Right`) node.
    pub(crate) fn extreme(&self, side: Side) -> Option<Handle> {
        self.root.map(|root| self.extreme_from(root, side))
    }

    fn extreme_from(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(next) = self.node(handle).child(side) {
            handle = next;
        }
        handle
    }

    /// Searches for the node whose key the probe reports as `Equal`.
    ///
    /// `probe(k)` must return the ordering of the sought key relative to `k`.
    pub(crate) fn search(&self, probe: impl Fn(&K) -> Ordering) -> SearchResult {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            side = match probe(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return SearchResult::Found(handle),
            };
            parent = Some(handle);
            current = node.child(side);
        }

        SearchResult::NotFound { parent, side }
    }

    pub(crate) fn find(&self, probe: impl Fn(&K) -> Ordering) -> Option<Handle> {
        match self.search(probe) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::NotFound { .. } => None,
        }
    }

    /// Links a new node at a vacancy reported by [`search`](Self::search) and rebalances.
    pub(crate) fn insert_at(&mut self, parent: Option<Handle>, side: Side, key: K, value: V) -> Handle {
        let handle = self.nodes.alloc(Node::new(key, value, parent));

        match parent {
            None => self.root = Some(handle),
            Some(parent) => {
                self.node_mut(parent).set_child(side, Some(handle));
                let mut current = Some(parent);
                while let Some(ancestor) = current {
                    let node = self.node_mut(ancestor);
                    node.size += 1;
                    current = node.parent;
                }
            }
        }

        self.fix_after_insertion(handle);
        handle
    }

    /// Unlinks `target` and returns its entry.
    ///
    /// A node with two children trades places with its in-order successor: the
    /// successor's node is the one physically unlinked, and its entry moves into
    /// `target`'s node.
    pub(crate) fn remove(&mut self, target: Handle) -> (K, V) {
        let victim = match (self.node(target).left, self.node(target).right) {
            (Some(_), Some(right)) => self.extreme_from(right, Side::Left),
            _ => target,
        };

        let (parent, replacement, victim_is_black) = {
            let node = self.node(victim);
            (node.parent, node.left.or(node.right), !node.is_red())
        };

        if let Some(replacement) = replacement {
            self.node_mut(replacement).parent = parent;
            self.replace_child(parent, victim, Some(replacement));
            self.refresh_sizes_to_root(parent);
            if victim_is_black {
                self.fix_after_removal(replacement);
            }
        } else if parent.is_none() {
            self.root = None;
        } else {
            // The fixup needs the victim's sibling, so it runs while the victim is still linked.
            if victim_is_black {
                self.fix_after_removal(victim);
            }
            let parent = self.node(victim).parent;
            debug_assert!(parent.is_some(), "removal fixup promoted a leaf to the root");
            self.replace_child(parent, victim, None);
            self.refresh_sizes_to_root(parent);
        }

        let removed = self.nodes.take(victim);
        if victim == target {
            return (removed.key, removed.value);
        }

        let node = self.node_mut(target);
        (mem::replace(&mut node.key, removed.key), mem::replace(&mut node.value, removed.value))
    }

    /// Returns the node with exactly `index` smaller keys.
    pub(crate) fn select(&self, mut index: usize) -> Option<Handle> {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            let left_size = self.size_of(node.left);
            match index.cmp(&left_size) {
                Ordering::Less => current = node.left,
                Ordering::Equal => return Some(handle),
                Ordering::Greater => {
                    index -= left_size + 1;
                    current = node.right;
                }
            }
        }

        None
    }

    /// Returns the number of keys strictly smaller than the probed key.
    pub(crate) fn rank(&self, probe: impl Fn(&K) -> Ordering) -> usize {
        let mut rank = 0;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.node(handle);
            match probe(&node.key) {
                Ordering::Less => current = node.left,
                Ordering::Greater => {
                    rank += 1 + self.size_of(node.left);
                    current = node.right;
                }
                Ordering::Equal => return rank + self.size_of(node.left),
            }
        }

        rank
    }

    /// Returns the closest node on `toward`'s side of the probed key, the key itself included.
    ///
    /// `Side::Left` gives the floor, `Side::Right` the ceiling.
    pub(crate) fn bound(&self, probe: impl Fn(&K) -> Ordering, toward: Side) -> Option<Handle> {
        let mut current = self.root?;

        loop {
            let node = self.node(current);
            let direction = match probe(&node.key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return Some(current),
            };

            if let Some(next) = node.child(direction) {
                current = next;
                continue;
            }

            // Dead end. Heading away from `toward` means this node already lies on the right side.
            if direction != toward {
                return Some(current);
            }

            // Otherwise the answer is the first ancestor entered from its far side.
            let mut child = current;
            let mut parent = node.parent;
            while let Some(ancestor) = parent {
                if self.side_of(child, ancestor) != toward {
                    break;
                }
                child = ancestor;
                parent = self.node(ancestor).parent;
            }
            return parent;
        }
    }

    /// Moves every entry out in ascending key order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut order = Vec::with_capacity(self.len());
        let mut cursor = InOrder::new(self.root, Side::Left);
        while let Some(handle) = cursor.next(self) {
            order.push(handle);
        }

        debug!("draining {} entries", order.len());
        let drained = order
            .into_iter()
            .map(|handle| {
                let node = self.nodes.take(handle);
                (node.key, node.value)
            })
            .collect();

        self.clear();
        drained
    }

    // ─── Rebalancing ─────────────────────────────────────────────────────────

    fn fix_after_insertion(&mut self, mut current: Handle) {
        while let Some(parent) = self.node(current).parent {
            if !self.node(parent).is_red() {
                break;
            }
            // A red node is never the root, so the grandparent exists.
            let Some(grandparent) = self.node(parent).parent else {
                break;
            };

            let side = self.side_of(parent, grandparent);
            let uncle = self.node(grandparent).child(side.opposite());

            if self.color_of(uncle) == Color::Red {
                trace!("insert fixup: red uncle, recoloring at {grandparent:?}");
                self.set_color(Some(parent), Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(Some(grandparent), Color::Red);
                current = grandparent;
            } else {
                if self.node(parent).child(side.opposite()) == Some(current) {
                    trace!("insert fixup: inner child, straightening at {parent:?}");
                    current = parent;
                    self.rotate(current, side);
                }
                trace!("insert fixup: outer child, rotating at {grandparent:?}");
                self.rotate(grandparent, side.opposite());
            }
        }

        self.set_color(self.root, Color::Black);
    }

    /// Repairs the black-height deficit at `current` left by unlinking a black node.
    fn fix_after_removal(&mut self, mut current: Handle) {
        while Some(current) != self.root && !self.node(current).is_red() {
            let Some(parent) = self.node(current).parent else {
                break;
            };
            let side = self.side_of(current, parent);
            let far = side.opposite();

            let mut sibling = self.node(parent).child(far);
            if self.color_of(sibling) == Color::Red {
                trace!("remove fixup: red sibling, rotating at {parent:?}");
                self.rotate(parent, side);
                sibling = self.node(parent).child(far);
            }

            // Uniform black height guarantees a sibling for a black non-root node.
            debug_assert!(sibling.is_some(), "black node {current:?} has no sibling");
            let Some(mut sibling) = sibling else {
                current = parent;
                continue;
            };

            let near_is_black = self.color_of(self.node(sibling).child(side)) == Color::Black;
            let far_is_black = self.color_of(self.node(sibling).child(far)) == Color::Black;

            if near_is_black && far_is_black {
                trace!("remove fixup: black nephews, pushing deficit up to {parent:?}");
                self.set_color(Some(sibling), Color::Red);
                current = parent;
                continue;
            }

            if far_is_black {
                trace!("remove fixup: red near nephew, rotating at {sibling:?}");
                self.rotate(sibling, far);
                match self.node(parent).child(far) {
                    Some(promoted) => sibling = promoted,
                    None => break,
                }
            }

            trace!("remove fixup: red far nephew, rotating at {parent:?}");
            let far_nephew = self.node(sibling).child(far);
            self.set_color(far_nephew, Color::Black);
            self.rotate(parent, side);
            self.set_color(self.root, Color::Black);
            return;
        }

        self.set_color(Some(current), Color::Black);
    }

    /// Rotates `pivot` down toward `direction`, promoting its child on the opposite side.
    ///
    /// The rotated pair swaps colors and both sizes are recomputed; sizes above the
    /// pair are unaffected since the subtree keeps the same nodes.
    fn rotate(&mut self, pivot: Handle, direction: Side) {
        let promoted = self.node(pivot).child(direction.opposite());
        debug_assert!(promoted.is_some(), "rotation at {pivot:?} has no child to promote");
        let Some(promoted) = promoted else {
            return;
        };
        trace!("rotate {direction:?} at {pivot:?}, promoting {promoted:?}");

        let inner = self.node(promoted).child(direction);
        self.node_mut(pivot).set_child(direction.opposite(), inner);
        if let Some(inner) = inner {
            self.node_mut(inner).parent = Some(pivot);
        }

        let parent = self.node(pivot).parent;
        self.replace_child(parent, pivot, Some(promoted));
        self.node_mut(promoted).parent = parent;

        self.node_mut(promoted).set_child(direction, Some(pivot));
        self.node_mut(pivot).parent = Some(promoted);

        let pivot_color = self.node(pivot).color;
        let promoted_color = mem::replace(&mut self.node_mut(promoted).color, pivot_color);
        self.node_mut(pivot).color = promoted_color;

        self.refresh_size(pivot);
        self.refresh_size(promoted);
    }

    // ─── Link and size helpers ───────────────────────────────────────────────

    /// Points whichever link held `old` (a child slot of `parent`, or the root) at `new`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.node_mut(parent).set_child(side, new);
            }
        }
    }

    fn side_of(&self, child: Handle, parent: Handle) -> Side {
        if self.node(parent).left == Some(child) { Side::Left } else { Side::Right }
    }

    fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |handle| self.node(handle).size)
    }

    // Absent children count as black.
    fn color_of(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |handle| self.node(handle).color)
    }

    fn set_color(&mut self, handle: Option<Handle>, color: Color) {
        if let Some(handle) = handle {
            self.node_mut(handle).color = color;
        }
    }

    fn refresh_size(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.node(handle);
            (node.left, node.right)
        };
        self.node_mut(handle).size = 1 + self.size_of(left) + self.size_of(right);
    }

    fn refresh_sizes_to_root(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.refresh_size(handle);
            current = self.node(handle).parent;
        }
    }
}
