use core::cmp::Ordering;

/// A total order over `T`, chosen once when a map is built.
///
/// Every closure of the form `Fn(&T, &T) -> Ordering` is a comparator, and
/// [`Natural`] defers to `T`'s own [`Ord`] implementation.
///
/// The ordering must be total and must not change while keys are stored in a map.
/// A comparator that violates this does not cause undefined behavior, but lookups,
/// bounds and ranks on the affected map become unspecified.
///
/// # Examples
///
/// ```
/// use rbos_tree::RBTreeMap;
///
/// // Longest words first.
/// let mut map = RBTreeMap::with_comparator(|a: &&str, b: &&str| b.len().cmp(&a.len()));
/// map.insert("fig", 1);
/// map.insert("banana", 2);
/// map.insert("kiwis", 3);
///
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), ["banana", "kiwis", "fig"]);
/// ```
pub trait Comparator<T: ?Sized> {
    /// Orders `a` relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The comparator used by [`RBTreeMap::new`](crate::RBTreeMap::new): the key's own [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<T: ?Sized + Ord> Comparator<T> for Natural {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
