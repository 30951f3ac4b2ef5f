use smallvec::SmallVec;

use super::handle::Handle;
use super::node::Side;
use super::raw_rb_tree_map::RawRBTreeMap;

/// Where a stacked node is in its own in-order visit.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    DescendNear,
    Emit,
    DescendFar,
    Done,
}

#[derive(Clone, Copy, Debug)]
struct Frame {
    node: Handle,
    phase: Phase,
}

impl Frame {
    const fn new(node: Handle) -> Self {
        Self {
            node,
            phase: Phase::DescendNear,
        }
    }
}

/// Resumable in-order walk over a tree.
///
/// Starting from `Side::Left` walks keys ascending, from `Side::Right` descending.
/// The cursor holds no borrow of the tree; each step is handed the tree it walks.
/// Stepping after the tree was restructured yields unspecified handles, so callers
/// keep the tree borrowed (or untouched) for the cursor's whole life.
#[derive(Clone, Debug)]
pub(crate) struct InOrder {
    stack: SmallVec<[Frame; 32]>,
    near: Side,
}

impl InOrder {
    pub(crate) fn new(root: Option<Handle>, near: Side) -> Self {
        let mut stack = SmallVec::new();
        if let Some(root) = root {
            stack.push(Frame::new(root));
        }
        Self { stack, near }
    }

    /// Advances to the next node in walk order.
    pub(crate) fn next<K, V>(&mut self, tree: &RawRBTreeMap<K, V>) -> Option<Handle> {
        while let Some(frame) = self.stack.last_mut() {
            let node = frame.node;
            match frame.phase {
                Phase::DescendNear => {
                    frame.phase = Phase::Emit;
                    if let Some(child) = tree.node(node).child(self.near) {
                        self.stack.push(Frame::new(child));
                    }
                }
                Phase::Emit => {
                    frame.phase = Phase::DescendFar;
                    return Some(node);
                }
                Phase::DescendFar => {
                    frame.phase = Phase::Done;
                    if let Some(child) = tree.node(node).child(self.near.opposite()) {
                        self.stack.push(Frame::new(child));
                    }
                }
                Phase::Done => {
                    self.stack.pop();
                }
            }
        }
        None
    }
}
