//! A fixed-capacity, dual-ordered hash table for tracking bundles awaiting
//! custody acknowledgement in a delay-tolerant-networking (DTN) bundle agent.
//!
//! `rh-hash` provides [`CustodyTable`], a table over custody identifiers
//! (CIDs) that simultaneously supports:
//!
//! - O(1)-amortized lookup, insertion, and removal by CID
//! - O(1) access to the oldest active entry, for the retransmission scanner
//!
//! Both orderings are maintained by a single open-addressed hash table with
//! Robin-Hood displacement, rather than a hash map paired with a separate
//! ordered structure. See [`CustodyTable`] for the full API and worked
//! examples.
//!
//! # Usage
//!
//! ```
//! use rh_hash::{Bundle, CustodyTable};
//!
//! let mut table = CustodyTable::new(1024).unwrap();
//!
//! table.add(Bundle { cid: 1, sid: 100, retx_time: 5_000 }, false).unwrap();
//! table.add(Bundle { cid: 2, sid: 200, retx_time: 5_100 }, false).unwrap();
//!
//! let oldest = table.oldest().unwrap();
//! assert_eq!(oldest.cid, 1);
//!
//! table.remove(1).unwrap();
//! assert_eq!(table.len(), 1);
//! ```
//!
//! # Algorithm
//!
//! The table is a flat array of slots, sized to the table's [`Capacity`] and
//! indexed by `cid % capacity`. Two intrusive doubly-linked lists share that
//! same array:
//!
//! - A **collision chain** per home bucket (`next`/`prev`), rooted at the
//!   bucket's home slot.
//! - A single global **age list** (`after`/`before`) threading every occupied
//!   slot in insertion (or last-overwrite) order.
//!
//! Both lists are represented internally as plain integer offsets into the
//! slot array rather than pointers, so the whole table lives in one
//! contiguous, pre-allocated allocation with no per-entry heap allocation.
//!
//! The core invariant this table upholds is: **a CID's home slot is always
//! either the head of that bucket's collision chain, or vacant.** Maintaining
//! this under Robin-Hood displacement (an interloper occupying a slot that is
//! some other CID's home) and under tail-compacted removal is the
//! algorithmic substance of this crate; see `src/rh_hash.rs` for the
//! slot-by-slot reasoning.
//!
//! # Configuration
//!
//! Table capacity is chosen at construction time via [`CustodyTable::new`],
//! which validates it through [`Capacity::new`]. Unlike a compile-time-sized
//! or power-of-two-rounded table, capacity here tracks the caller's exact
//! requested value — see [`Capacity`] for why.
//!
//! # Errors
//!
//! Every fallible operation returns [`RhHashError`], a `#[non_exhaustive]`
//! enum distinguishing bad configuration, a full table, a duplicate CID, and
//! a missing CID. None of these are retried internally.
//!
//! # Instrumentation
//!
//! With the `tracing` feature enabled, `add`, `remove`, and `oldest` emit
//! `tracing` spans, and capacity exhaustion and Robin-Hood displacement emit
//! `warn`/`debug` events respectively. The feature is off by default so the
//! core has zero instrumentation overhead when unused.
//!
//! # Concurrency
//!
//! [`CustodyTable`] is `Send` but not `Sync`: it is a single-owner structure,
//! matching the single bundle agent that owns a given CID namespace. Callers
//! needing to share one table across threads must synchronize externally.

mod bundle;
mod capacity;
mod error;
mod index;
mod public;
mod rh_hash;
mod slot;

pub use self::bundle::Bundle;
pub use self::bundle::SID_VACANT;
pub use self::capacity::Capacity;
pub use self::error::RhHashError;
pub use self::public::CustodyTable;
