//! The error type returned by fallible table operations.

use core::fmt;

/// An error returned by a fallible [`CustodyTable`](crate::CustodyTable) operation.
///
/// There are exactly four error kinds, matching the four ways a caller can
/// misuse or exhaust the table. None are retried internally; every error path
/// leaves the table exactly as it was found.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RhHashError {
  /// `Capacity::new` was given a capacity of zero, or one that would leave
  /// no room for the `NIL` sentinel.
  ParamError,

  /// `add` could not locate a vacant slot to host the new entry.
  TableFull,

  /// `add(bundle, overwrite: false)` was called for a CID that already has
  /// an active entry.
  DuplicateCid {
    /// The CID that was already present.
    cid: u64,
  },

  /// `remove` found no entry for the given CID, or `oldest` was called on an
  /// empty table (in which case `cid` is `None`).
  CidNotFound {
    /// The CID that was looked up, if the operation was CID-keyed.
    cid: Option<u64>,
  },
}

impl fmt::Display for RhHashError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match *self {
      Self::ParamError => f.write_str("invalid table capacity"),
      Self::TableFull => f.write_str("table is at capacity"),
      Self::DuplicateCid { cid } => write!(f, "cid {cid} already has an active entry"),
      Self::CidNotFound { cid: Some(cid) } => write!(f, "no active entry for cid {cid}"),
      Self::CidNotFound { cid: None } => f.write_str("table is empty"),
    }
  }
}

impl core::error::Error for RhHashError {}
