//! Red-black order-statistic tree for Rust.
//!
//! This crate provides [`RBTreeMap`], an ordered map with the familiar
//! `BTreeMap`-style API plus the classic symbol-table queries, all in O(log n):
//!
//! - [`select`](RBTreeMap::select) / [`get_by_rank`](RBTreeMap::get_by_rank) - the key at a sorted position
//! - [`rank`](RBTreeMap::rank) / [`rank_of`](RBTreeMap::rank_of) - how many keys sort below a key
//! - [`floor`](RBTreeMap::floor) / [`ceiling`](RBTreeMap::ceiling) - the nearest key at or beyond a bound
//! - [`min`](RBTreeMap::min), [`max`](RBTreeMap::max), [`remove_min`](RBTreeMap::remove_min), [`remove_max`](RBTreeMap::remove_max)
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first value
//!
//! # Example
//!
//! ```
//! use rbos_tree::{Error, RBTreeMap, Rank};
//!
//! let mut scores = RBTreeMap::new();
//! scores.insert("Alice", 100);
//! scores.insert("Bob", 85);
//! scores.insert("Carol", 92);
//!
//! assert_eq!(scores.get("Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(scores.select(1), Ok(&"Bob"));
//! assert_eq!(scores.rank("Bill"), 1);
//! assert_eq!(scores[Rank(2)], 92);
//!
//! // Symbol-table operations report failures as `Error`s
//! assert_eq!(scores.floor("Aaron"), Err(Error::NotFound));
//! assert_eq!(scores.select(3), Err(Error::InvalidArgument { index: 3, len: 3 }));
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`
//! - **No unsafe code** - Nodes live in an index arena; parent links are plain handles
//! - **Pluggable ordering** - Any `Fn(&K, &K) -> Ordering` can order a map, see [`Comparator`]
//!
//! # Implementation
//!
//! The map is a classical (not left-leaning) red-black tree with parent links. Each
//! node records the size of its subtree, kept current through every insertion,
//! removal and rotation, which is what makes rank queries logarithmic. Rebalancing
//! steps are reported through the [`log`] facade at `trace` level.
//!
//! [`log`]: https://docs.rs/log

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order_statistic;
mod raw;

pub mod rb_tree_map;

pub use compare::{Comparator, Natural};
pub use error::{Error, Result};
pub use order_statistic::Rank;
pub use rb_tree_map::RBTreeMap;
