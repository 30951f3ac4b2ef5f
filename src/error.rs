use thiserror::Error;

/// Errors reported by the symbol-table operations of [`RBTreeMap`](crate::RBTreeMap).
///
/// Every error is raised before the tree is touched, so a failed call leaves the
/// map exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
#[non_exhaustive]
pub enum Error {
    /// An argument was outside the domain of the operation, such as a
    /// [`select`](crate::RBTreeMap::select) index not below the map's length.
    #[error("invalid argument: index {index} is out of range for a map of length {len}")]
    InvalidArgument {
        /// The rejected index.
        index: usize,
        /// Length of the map at the time of the call.
        len: usize,
    },
    /// The operation needs at least one entry but the map is empty.
    #[error("the map is empty")]
    EmptyCollection,
    /// No key satisfies the requested bound, or the requested key is absent.
    #[error("no such key in the map")]
    NotFound,
}

/// A specialized [`Result`](core::result::Result) for map operations.
pub type Result<T> = core::result::Result<T, Error>;
