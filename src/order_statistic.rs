/// A zero-based rank into the sorted order of a map.
///
/// Indexing an [`RBTreeMap`](crate::RBTreeMap) by `Rank` reaches the value of the
/// entry with exactly that many smaller keys.
///
/// # Examples
///
/// ```
/// use rbos_tree::{RBTreeMap, Rank};
///
/// let mut map = RBTreeMap::new();
/// map.insert("a", 10);
/// map.insert("b", 20);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
