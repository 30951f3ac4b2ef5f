//! An ordered map based on a red-black tree, with order-statistic queries.

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;
use core::mem;
use core::ops::Index;

use crate::compare::{Comparator, Natural};
use crate::error::{Error, Result};
use crate::raw::{Handle, InOrder, RawRBTreeMap, SearchResult, Side};

mod capacity;
mod order_statistic;

pub use crate::Rank;

/// An ordered map based on a [red-black tree] augmented with subtree sizes.
///
/// Keys are kept in the order of the map's [`Comparator`]; by default that is the
/// key type's own [`Ord`]. Besides the usual map operations, the subtree sizes make
/// order-statistic queries logarithmic: [`select`](RBTreeMap::select) finds the key
/// at a sorted position and [`rank`](RBTreeMap::rank) counts the keys below a bound.
///
/// | Operation | Cost |
/// |---|---|
/// | `get`, `insert`, `remove`, `floor`, `ceiling` | O(log n) |
/// | `min`, `max`, `remove_min`, `remove_max` | O(log n) |
/// | `select`, `rank`, `get_by_rank`, `rank_of` | O(log n) |
/// | `len`, `is_empty` | O(1) |
/// | `height` | O(n) |
///
/// The red-black invariants keep the tree height below 2·log<sub>2</sub>(n + 1), no
/// matter the order in which keys arrive.
///
/// It is a logic error for a key to be modified in such a way that its ordering
/// relative to any other key changes while it is in the map. The behavior resulting
/// from such a logic error is not specified, but will be encapsulated to the
/// `RBTreeMap` that observed it and not result in undefined behavior.
///
/// # Examples
///
/// ```
/// use rbos_tree::{Error, RBTreeMap};
///
/// let mut heights = RBTreeMap::new();
/// heights.insert("Everest", 8849);
/// heights.insert("K2", 8611);
/// heights.insert("Kangchenjunga", 8586);
/// heights.insert("Lhotse", 8516);
///
/// assert_eq!(heights.get("K2"), Some(&8611));
/// assert_eq!(heights.min(), Ok(&"Everest"));
///
/// // Order statistics.
/// assert_eq!(heights.select(2), Ok(&"Kangchenjunga"));
/// assert_eq!(heights.rank("Kilimanjaro"), 3);
///
/// // Nearest keys.
/// assert_eq!(heights.floor("Annapurna"), Err(Error::NotFound));
/// assert_eq!(heights.ceiling("Annapurna"), Ok(&"Everest"));
///
/// for (mountain, metres) in &heights {
///     println!("{mountain}: {metres} m");
/// }
/// ```
///
/// [red-black tree]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
pub struct RBTreeMap<K, V, C = Natural> {
    raw: RawRBTreeMap<K, V>,
    comparator: C,
}

/// An iterator over the entries of an `RBTreeMap`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`RBTreeMap`]. It walks the
/// live tree with an explicit stack, so creating one costs O(1) and the whole walk
/// O(n). The shared borrow it holds rules out mutating the map mid-walk.
///
/// # Examples
///
/// ```
/// use rbos_tree::RBTreeMap;
///
/// let map = RBTreeMap::from([(1, "a"), (2, "b")]);
/// let mut iter = map.iter();
/// assert_eq!(iter.next(), Some((&1, &"a")));
/// assert_eq!(iter.next_back(), Some((&2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: RBTreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawRBTreeMap<K, V>,
    front: InOrder,
    back: InOrder,
    remaining: usize,
}

/// An iterator over the keys of an `RBTreeMap`, in ascending order.
///
/// This `struct` is created by the [`keys`] method on [`RBTreeMap`].
///
/// [`keys`]: RBTreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of an `RBTreeMap`, in key order.
///
/// This `struct` is created by the [`values`] method on [`RBTreeMap`].
///
/// [`values`]: RBTreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An owning iterator over the entries of an `RBTreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`RBTreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An owning iterator over the keys of an `RBTreeMap`.
///
/// This `struct` is created by the [`into_keys`] method on [`RBTreeMap`].
///
/// [`into_keys`]: RBTreeMap::into_keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoKeys<K, V> {
    inner: IntoIter<K, V>,
}

/// An owning iterator over the values of an `RBTreeMap`.
///
/// This `struct` is created by the [`into_values`] method on [`RBTreeMap`].
///
/// [`into_values`]: RBTreeMap::into_values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IntoValues<K, V> {
    inner: IntoIter<K, V>,
}

impl<K, V> RBTreeMap<K, V> {
    /// Makes a new, empty `RBTreeMap` ordered by the keys' [`Ord`].
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<K, V, C> RBTreeMap<K, V, C> {
    /// Makes a new, empty `RBTreeMap` ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// map.extend([(1, 'a'), (3, 'c'), (2, 'b')]);
    ///
    /// assert_eq!(map.min(), Ok(&3));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        RBTreeMap {
            raw: RawRBTreeMap::new(),
            comparator,
        }
    }

    /// Returns the comparator that orders this map.
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut a = RBTreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of edges on the longest path from the root to a leaf, or
    /// `None` for an empty map.
    ///
    /// A map with a single entry has height `Some(0)`. The height never exceeds
    /// 2·log<sub>2</sub>(n + 1).
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.height(), None);
    ///
    /// map.extend((0..1023).map(|k| (k, ())));
    /// assert!(map.height().unwrap() <= 20);
    /// ```
    #[must_use]
    pub fn height(&self) -> Option<usize> {
        self.raw.height()
    }

    /// Clears the map, removing all elements.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            tree: &self.raw,
            front: InOrder::new(self.raw.root(), Side::Left),
            back: InOrder::new(self.raw.root(), Side::Right),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys of the map, in sorted order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let map = RBTreeMap::from([(2, "b"), (1, "a")]);
    /// let keys: Vec<_> = map.keys().copied().collect();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Creates a consuming iterator visiting all the keys, in sorted order.
    pub fn into_keys(self) -> IntoKeys<K, V> {
        IntoKeys {
            inner: self.into_iter(),
        }
    }

    /// Creates a consuming iterator visiting all the values, in order by key.
    pub fn into_values(self) -> IntoValues<K, V> {
        IntoValues {
            inner: self.into_iter(),
        }
    }

    /// Returns the first key-value pair in the map, or `None` if it is empty.
    #[must_use]
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.raw.extreme(Side::Left).map(|handle| self.raw.key_value(handle))
    }

    /// Returns the last key-value pair in the map, or `None` if it is empty.
    #[must_use]
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.raw.extreme(Side::Right).map(|handle| self.raw.key_value(handle))
    }

    /// Removes and returns the first element in the map, or `None` if it is empty.
    pub fn pop_first(&mut self) -> Option<(K, V)> {
        self.raw.extreme(Side::Left).map(|handle| self.raw.remove(handle))
    }

    /// Removes and returns the last element in the map, or `None` if it is empty.
    pub fn pop_last(&mut self) -> Option<(K, V)> {
        self.raw.extreme(Side::Right).map(|handle| self.raw.remove(handle))
    }

    /// Returns the smallest key in the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.min(), Err(Error::EmptyCollection));
    /// map.insert(3, "c");
    /// map.insert(1, "a");
    /// assert_eq!(map.min(), Ok(&1));
    /// ```
    pub fn min(&self) -> Result<&K> {
        self.first_key_value().map(|(key, _)| key).ok_or(Error::EmptyCollection)
    }

    /// Returns the largest key in the map.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the map is empty.
    pub fn max(&self) -> Result<&K> {
        self.last_key_value().map(|(key, _)| key).ok_or(Error::EmptyCollection)
    }

    /// Removes the entry with the smallest key and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.remove_min(), Ok("a"));
    /// assert_eq!(map.remove_min(), Ok("b"));
    /// assert_eq!(map.remove_min(), Err(Error::EmptyCollection));
    /// ```
    pub fn remove_min(&mut self) -> Result<V> {
        self.pop_first().map(|(_, value)| value).ok_or(Error::EmptyCollection)
    }

    /// Removes the entry with the largest key and returns its value.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the map is empty.
    pub fn remove_max(&mut self) -> Result<V> {
        self.pop_last().map(|(_, value)| value).ok_or(Error::EmptyCollection)
    }

    /// Locates the node holding a key equal to `key` under the map's comparator.
    fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.raw.find(|k| self.comparator.compare(key, k.borrow()))
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the key-value pair corresponding to the supplied key.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).map(|handle| self.raw.key_value(handle))
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.find(key)?;
        Some(self.raw.value_mut(handle))
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.find(key).is_some()
    }

    /// Removes a key from the map, returning the value at the key if the key was
    /// previously in the map. Removing an absent key leaves the map untouched.
    ///
    /// An empty map also yields `None`; use [`try_remove`](Self::try_remove) to
    /// tell [`Error::EmptyCollection`] apart from [`Error::NotFound`].
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value if the key
    /// was previously in the map.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        let handle = self.find(key)?;
        Some(self.raw.remove(handle))
    }

    /// Removes a key from the map, reporting why nothing was removed.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the map is empty, [`Error::NotFound`] if the key
    /// is absent. The map is unchanged in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::{Error, RBTreeMap};
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.try_remove(&1), Err(Error::EmptyCollection));
    /// map.insert(1, "a");
    /// assert_eq!(map.try_remove(&2), Err(Error::NotFound));
    /// assert_eq!(map.try_remove(&1), Ok("a"));
    /// ```
    pub fn try_remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        self.remove(key).ok_or(Error::NotFound)
    }

    /// Returns the largest key less than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the map is empty, [`Error::NotFound`] if every
    /// key is greater than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.floor(&25), Ok(&20));
    /// assert_eq!(map.floor(&20), Ok(&20));
    /// assert_eq!(map.floor(&5), Err(Error::NotFound));
    /// ```
    pub fn floor<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.bound(key, Side::Left)
    }

    /// Returns the smallest key greater than or equal to `key`.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyCollection`] if the map is empty, [`Error::NotFound`] if every
    /// key is less than `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::{Error, RBTreeMap};
    ///
    /// let map = RBTreeMap::from([(10, ()), (20, ()), (30, ())]);
    /// assert_eq!(map.ceiling(&25), Ok(&30));
    /// assert_eq!(map.ceiling(&35), Err(Error::NotFound));
    /// ```
    pub fn ceiling<Q>(&self, key: &Q) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        self.bound(key, Side::Right)
    }

    fn bound<Q>(&self, key: &Q, toward: Side) -> Result<&K>
    where
        K: Borrow<Q>,
        Q: ?Sized,
        C: Comparator<Q>,
    {
        if self.is_empty() {
            return Err(Error::EmptyCollection);
        }
        self.raw
            .bound(|k| self.comparator.compare(key, k.borrow()), toward)
            .map(|handle| self.raw.key(handle))
            .ok_or(Error::NotFound)
    }
}

impl<K, V, C: Comparator<K>> RBTreeMap<K, V, C> {
    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned.
    ///
    /// If the map did have this key present, the value is updated in place and the
    /// old value is returned. The key is not updated, and the tree's shape does not
    /// change.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.is_empty(), false);
    ///
    /// map.insert(37, "b");
    /// assert_eq!(map.insert(37, "c"), Some("b"));
    /// assert_eq!(map[&37], "c");
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.raw.search(|k| self.comparator.compare(&key, k)) {
            SearchResult::Found(handle) => Some(mem::replace(self.raw.value_mut(handle), value)),
            SearchResult::NotFound { parent, side } => {
                self.raw.insert_at(parent, side, key, value);
                None
            }
        }
    }

    /// Stores `value` under `key`, or removes `key` when `value` is `None`.
    ///
    /// Returns the value previously stored under `key`, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let mut map = RBTreeMap::new();
    /// assert_eq!(map.put("x", Some(1)), None);
    /// assert_eq!(map.put("x", Some(2)), Some(1));
    /// assert_eq!(map.put("x", None), Some(2));
    /// assert!(map.is_empty());
    /// ```
    pub fn put(&mut self, key: K, value: Option<V>) -> Option<V> {
        match value {
            Some(value) => self.insert(key, value),
            None => self.remove(&key),
        }
    }
}

impl<K, V, C: Default> Default for RBTreeMap<K, V, C> {
    /// Creates an empty `RBTreeMap` with a default-constructed comparator.
    fn default() -> Self {
        RBTreeMap::with_comparator(C::default())
    }
}

impl<K: Clone, V: Clone, C: Clone> Clone for RBTreeMap<K, V, C> {
    fn clone(&self) -> Self {
        RBTreeMap {
            raw: self.raw.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for RBTreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: PartialEq, V: PartialEq, C> PartialEq for RBTreeMap<K, V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq, C> Eq for RBTreeMap<K, V, C> {}

// No `Ord`: its by-value `min`/`max` would shadow the inherent ones.
impl<K: PartialOrd, V: PartialOrd, C> PartialOrd for RBTreeMap<K, V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Hash, V: Hash, C> Hash for RBTreeMap<K, V, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for entry in self {
            entry.hash(state);
        }
    }
}

impl<K, Q, V, C> Index<&Q> for RBTreeMap<K, V, C>
where
    K: Borrow<Q>,
    Q: ?Sized,
    C: Comparator<Q>,
{
    type Output = V;

    /// Returns a reference to the value corresponding to the supplied key.
    ///
    /// # Panics
    ///
    /// Panics if the key is not present in the `RBTreeMap`.
    #[inline]
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, C: Comparator<K> + Default> FromIterator<(K, V)> for RBTreeMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = RBTreeMap::with_comparator(C::default());
        map.extend(iter);
        map
    }
}

impl<K, V, C: Comparator<K>> Extend<(K, V)> for RBTreeMap<K, V, C> {
    #[inline]
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a, K: Copy + 'a, V: Copy + 'a, C: Comparator<K>> Extend<(&'a K, &'a V)> for RBTreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: I) {
        self.extend(iter.into_iter().map(|(&key, &value)| (key, value)));
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for RBTreeMap<K, V> {
    /// Converts a `[(K, V); N]` into an `RBTreeMap<K, V>`.
    ///
    /// If any entries in the array have equal keys, all but the last entry are discarded.
    ///
    /// ```
    /// use rbos_tree::RBTreeMap;
    ///
    /// let map1 = RBTreeMap::from([(1, 2), (3, 4)]);
    /// let map2: RBTreeMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, C> IntoIterator for &'a RBTreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V, C> IntoIterator for RBTreeMap<K, V, C> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

// ─── Iter ────────────────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.front.next(tree)?;
        self.remaining -= 1;
        Some(tree.key_value(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<Self::Item> {
        self.next_back()
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let handle = self.back.next(tree)?;
        self.remaining -= 1;
        Some(tree.key_value(handle))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── Keys / Values ───────────────────────────────────────────────────────────

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<K: fmt::Debug, V> fmt::Debug for Keys<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<K, V: fmt::Debug> fmt::Debug for Values<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

// ─── Owning iterators ────────────────────────────────────────────────────────

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<K, V> Iterator for IntoKeys<K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoKeys<K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<K, V> ExactSizeIterator for IntoKeys<K, V> {}

impl<K, V> FusedIterator for IntoKeys<K, V> {}

impl<K, V> Iterator for IntoValues<K, V> {
    type Item = V;

    fn next(&mut self) -> Option<V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoValues<K, V> {
    fn next_back(&mut self) -> Option<V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<K, V> ExactSizeIterator for IntoValues<K, V> {}

impl<K, V> FusedIterator for IntoValues<K, V> {}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn empty_map_rejects_extremes() {
        let mut map: RBTreeMap<i32, i32> = RBTreeMap::new();
        assert_eq!(map.min(), Err(Error::EmptyCollection));
        assert_eq!(map.max(), Err(Error::EmptyCollection));
        assert_eq!(map.remove_min(), Err(Error::EmptyCollection));
        assert_eq!(map.remove_max(), Err(Error::EmptyCollection));
        assert_eq!(map.floor(&0), Err(Error::EmptyCollection));
        assert_eq!(map.ceiling(&0), Err(Error::EmptyCollection));
        assert_eq!(map.try_remove(&0), Err(Error::EmptyCollection));
        assert_eq!(map.remove(&0), None);
        assert_eq!(map.height(), None);
        map.raw.validate_invariants();
    }

    #[test]
    fn min_and_max_resolve_to_the_symbol_table_methods() {
        let mut map: RBTreeMap<i32, i32> = RBTreeMap::new();
        map.extend([(4, 40), (-2, -20), (9, 90)]);
        assert_eq!(map.min(), Ok(&-2));
        assert_eq!(map.max(), Ok(&9));
        assert_eq!(map.remove_min(), Ok(-20));
        assert_eq!(map.min(), Ok(&4));
    }

    #[test]
    fn single_entry_map() {
        let map = RBTreeMap::from([(7, "seven")]);
        assert_eq!(map.height(), Some(0));
        assert_eq!(map.min(), map.max());
        assert_eq!(map.select(0), Ok(&7));
        assert_eq!(map.rank(&7), 0);
        assert_eq!(map.rank(&8), 1);
    }

    #[test]
    fn borrowed_lookups() {
        let mut map: RBTreeMap<String, usize> = RBTreeMap::new();
        for word in ["pear", "apple", "fig"] {
            map.insert(String::from(word), word.len());
        }
        assert_eq!(map.get("fig"), Some(&3));
        assert_eq!(map.floor("banana"), Ok(&String::from("apple")));
        assert_eq!(map.ceiling("banana"), Ok(&String::from("fig")));
        assert_eq!(map.rank("orange"), 2);
        assert_eq!(map["pear"], 4);
        assert_eq!(map.remove("apple"), Some(5));
        map.raw.validate_invariants();
    }

    #[test]
    fn custom_comparator_reverses_order() {
        let mut map = RBTreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
        map.extend((0..20).map(|k| (k, k * k)));
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), (0..20).rev().collect::<Vec<_>>());
        assert_eq!(map.min(), Ok(&19));
        assert_eq!(map.select(0), Ok(&19));
        // Under a reversed order the floor is the numerically larger neighbour.
        map.remove(&10);
        assert_eq!(map.floor(&10), Ok(&11));
        assert_eq!(map.ceiling(&10), Ok(&9));
    }

    #[test]
    fn put_none_removes() {
        let mut map = RBTreeMap::new();
        map.put(1, Some("a"));
        map.put(2, Some("b"));
        assert_eq!(map.put(1, None), Some("a"));
        assert_eq!(map.put(3, None), None);
        assert_eq!(map.len(), 1);
        map.raw.validate_invariants();
    }

    #[test]
    fn iterators_meet_in_the_middle() {
        let map: RBTreeMap<i32, i32> = (0..10).map(|k| (k, -k)).collect();
        let mut iter = map.iter();
        assert_eq!(iter.len(), 10);
        assert_eq!(iter.next(), Some((&0, &0)));
        assert_eq!(iter.next_back(), Some((&9, &-9)));
        let middle: Vec<_> = iter.by_ref().map(|(k, _)| *k).collect();
        assert_eq!(middle, [1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn owning_iterators() {
        let map: RBTreeMap<i32, char> = [(3, 'c'), (1, 'a'), (2, 'b')].into();
        assert_eq!(map.clone().into_keys().collect::<Vec<_>>(), [1, 2, 3]);
        assert_eq!(map.clone().into_values().rev().collect::<String>(), "cba");
        assert_eq!(map.into_iter().collect::<Vec<_>>(), [(1, 'a'), (2, 'b'), (3, 'c')]);
    }

    #[test]
    fn debug_and_equality() {
        let a = RBTreeMap::from([(2, "b"), (1, "a")]);
        let mut b = RBTreeMap::new();
        b.insert(1, "a");
        assert_ne!(a, b);
        b.insert(2, "b");
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), r#"{1: "a", 2: "b"}"#);
        assert_eq!(format!("{:?}", a.keys()), "[1, 2]");
        assert!(RBTreeMap::from([(1, 0)]) < RBTreeMap::from([(2, 0)]));
    }

    #[test]
    fn clone_is_independent() {
        let mut original: RBTreeMap<i32, i32> = (0..50).map(|k| (k, k)).collect();
        let copy = original.clone();
        for k in 0..25 {
            original.remove(&k);
        }
        original.raw.validate_invariants();
        copy.raw.validate_invariants();
        assert_eq!(copy.len(), 50);
        assert_eq!(original.len(), 25);
    }
}
