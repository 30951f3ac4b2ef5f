mod arena;
mod handle;
mod node;
mod raw_rb_tree_map;
mod traversal;

pub(crate) use handle::Handle;
pub(crate) use node::Side;
pub(crate) use raw_rb_tree_map::{RawRBTreeMap, SearchResult};
pub(crate) use traversal::InOrder;
