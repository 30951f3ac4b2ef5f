use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use super::RBTreeMap;
use crate::Rank;
use crate::compare::Comparator;
use crate::error::{Error, Result};

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Returns the key with exactly `index` smaller keys in the map.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] unless `index < self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(5, ()), (3, ()), (8, ())]);
    /// assert_eq!(map.select(0), Ok(&3));
    /// assert_eq!(map.select(2), Ok(&8));
    /// assert_eq!(map.select(3), Err(Error::InvalidArgument { index: 3, len: 3 }));
    /// ```
    pub fn select(&self, index: usize) -> Result<&K> {
        self.get_by_rank(index).map(|(key, _)| key).ok_or(Error::InvalidArgument {
            index,
            len: self.len(),
        })
    }

    /// Returns the number of keys in the map strictly less than `key`.
    ///
    /// `key` does not need to be present. For a present key this is its zero-based
    /// position, so `map.select(map.rank(k)) == Ok(k)`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.rank(&5), 0);
    /// assert_eq!(map.rank(&20), 1);
    /// assert_eq!(map.rank(&25), 2);
    /// assert_eq!(map.rank(&99), 3);
    /// ```
    #[must_use]
    pub fn rank<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.rank(|k| self.comparator.compare(key, k.borrow()))
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.select(rank).map(|handle| self.raw.key_value(handle))
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(5, "b");
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.key_value_mut(handle))
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank_of(&20), Some(1));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.contains_key(key).then(|| self.rank(key))
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rbos_tree::{RBTreeMap, Rank};
///
/// let map = RBTreeMap::from([("a", 1), ("b", 2)]);
/// assert_eq!(map[Rank(1)], 2);
/// ```
impl<K, V, C> Index<Rank> for RBTreeMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use rbos_tree::{RBTreeMap, Rank};
///
/// let mut map = RBTreeMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V, C> IndexMut<Rank> for RBTreeMap<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}
