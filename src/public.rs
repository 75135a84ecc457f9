use core::fmt;

use crate::bundle::Bundle;
use crate::capacity::Capacity;
use crate::error::RhHashError;
use crate::rh_hash::RhHash;

/// A fixed-capacity, dual-ordered active-bundle table.
///
/// `CustodyTable` tracks bundles a DTN agent has handed to a lower layer and
/// is awaiting custody acknowledgement for. Every entry is indexed by its
/// custody identifier (CID) for O(1)-amortized lookup and removal, and the
/// whole table is simultaneously ordered oldest-first for the retransmission
/// scanner — both orderings are maintained by one open-addressed,
/// Robin-Hood-displacing hash table over a single pre-allocated backing
/// array. See the crate-level documentation for the algorithm.
///
/// # Examples
///
/// ```
/// use rh_hash::{Bundle, CustodyTable};
///
/// let mut table = CustodyTable::new(64).unwrap();
///
/// table.add(Bundle { cid: 1, sid: 100, retx_time: 5_000 }, false).unwrap();
/// table.add(Bundle { cid: 2, sid: 200, retx_time: 5_100 }, false).unwrap();
///
/// // The retransmission scanner asks for the oldest in-flight bundle.
/// assert_eq!(table.oldest().unwrap().cid, 1);
///
/// // An acknowledgement arrives for CID 1.
/// let acked = table.remove(1).unwrap();
/// assert_eq!(acked.sid, 100);
///
/// assert_eq!(table.len(), 1);
/// ```
///
/// # Capacity
///
/// Capacity is fixed at construction and never grows; [`CustodyTable::new`]
/// validates it through [`Capacity::new`]. When full, [`CustodyTable::add`]
/// returns [`RhHashError::TableFull`].
///
/// # Concurrency
///
/// `CustodyTable` is single-owner by design (see the crate-level docs): it is
/// `Send` but not `Sync`. A bundle agent that shares one table across threads
/// must serialize access externally, typically by holding the same lock that
/// guards the enclosing convergence-layer channel.
pub struct CustodyTable {
  inner: RhHash,
}

impl CustodyTable {
  /// Creates a new, empty table with room for `capacity` active bundles.
  ///
  /// # Errors
  ///
  /// Returns [`RhHashError::ParamError`] if `capacity` is `0` or exceeds
  /// [`Capacity::MAX`].
  ///
  /// # Examples
  ///
  /// ```
  /// use rh_hash::CustodyTable;
  ///
  /// let table = CustodyTable::new(256).unwrap();
  /// assert_eq!(table.capacity(), 256);
  /// assert!(table.is_empty());
  /// ```
  #[inline]
  pub fn new(capacity: usize) -> Result<Self, RhHashError> {
    Ok(Self {
      inner: RhHash::new(Capacity::new(capacity)?),
    })
  }

  /// Returns the table's fixed capacity.
  #[inline]
  pub const fn capacity(&self) -> usize {
    self.inner.capacity()
  }

  /// Returns the number of bundles currently active in the table.
  #[inline]
  pub const fn len(&self) -> usize {
    self.inner.count()
  }

  /// Returns `true` if the table holds no active bundles.
  #[inline]
  pub const fn is_empty(&self) -> bool {
    self.inner.is_empty()
  }

  /// Returns `Ok(())` if the table has room for at least one more bundle, or
  /// [`RhHashError::TableFull`] otherwise.
  ///
  /// `cid` is reserved for future per-bucket admission policies; it is
  /// currently accepted without validation and the result reflects only
  /// global fullness.
  ///
  /// # Examples
  ///
  /// ```
  /// use rh_hash::{Bundle, CustodyTable};
  ///
  /// let mut table = CustodyTable::new(1).unwrap();
  /// assert!(table.available(1).is_ok());
  ///
  /// table.add(Bundle { cid: 1, sid: 1, retx_time: 0 }, false).unwrap();
  /// assert!(table.available(2).is_err());
  /// ```
  #[inline]
  pub fn available(&self, _cid: u64) -> Result<(), RhHashError> {
    self.inner.available()
  }

  /// Inserts `bundle`, or replaces an existing entry for the same CID.
  ///
  /// When `overwrite` is `false` and an entry already exists for
  /// `bundle.cid`, the table is left unchanged and this returns
  /// [`RhHashError::DuplicateCid`]. When `overwrite` is `true`, an existing
  /// entry's payload is replaced and the entry is moved to the newest end of
  /// the age list — chain position is untouched.
  ///
  /// # Errors
  ///
  /// - [`RhHashError::ParamError`] if `bundle.sid` is
  ///   [`SID_VACANT`](crate::SID_VACANT).
  /// - [`RhHashError::DuplicateCid`] if the CID already has an entry and
  ///   `overwrite` is `false`.
  /// - [`RhHashError::TableFull`] if no vacant slot could be found.
  ///
  /// # Examples
  ///
  /// ```
  /// use rh_hash::{Bundle, CustodyTable, RhHashError};
  ///
  /// let mut table = CustodyTable::new(8).unwrap();
  /// let bundle = Bundle { cid: 7, sid: 70, retx_time: 0 };
  ///
  /// table.add(bundle, false).unwrap();
  ///
  /// let err = table.add(Bundle { sid: 71, ..bundle }, false).unwrap_err();
  /// assert_eq!(err, RhHashError::DuplicateCid { cid: 7 });
  /// ```
  #[inline]
  pub fn add(&mut self, bundle: Bundle, overwrite: bool) -> Result<(), RhHashError> {
    self.inner.add(bundle, overwrite)
  }

  /// Removes and returns the entry for `cid`.
  ///
  /// # Errors
  ///
  /// Returns [`RhHashError::CidNotFound`] if no active entry carries `cid`.
  ///
  /// # Examples
  ///
  /// ```
  /// use rh_hash::{Bundle, CustodyTable};
  ///
  /// let mut table = CustodyTable::new(8).unwrap();
  /// table.add(Bundle { cid: 3, sid: 30, retx_time: 0 }, false).unwrap();
  ///
  /// let bundle = table.remove(3).unwrap();
  /// assert_eq!(bundle.sid, 30);
  /// assert!(table.remove(3).is_err());
  /// ```
  #[inline]
  pub fn remove(&mut self, cid: u64) -> Result<Bundle, RhHashError> {
    self.inner.remove(cid)
  }

  /// Returns the oldest active bundle (by insertion or last-overwrite order)
  /// without removing it.
  ///
  /// This is the operation the retransmission scanner drives: it repeatedly
  /// peeks the oldest in-flight bundle to decide what to retransmit next.
  ///
  /// # Errors
  ///
  /// Returns [`RhHashError::CidNotFound`] if the table is empty.
  ///
  /// # Examples
  ///
  /// ```
  /// use rh_hash::{Bundle, CustodyTable};
  ///
  /// let mut table = CustodyTable::new(8).unwrap();
  /// table.add(Bundle { cid: 1, sid: 10, retx_time: 0 }, false).unwrap();
  /// table.add(Bundle { cid: 2, sid: 20, retx_time: 0 }, false).unwrap();
  ///
  /// assert_eq!(table.oldest().unwrap().cid, 1);
  /// assert_eq!(table.oldest().unwrap().cid, 1); // idempotent
  /// ```
  #[inline]
  pub fn oldest(&self) -> Result<Bundle, RhHashError> {
    self.inner.oldest()
  }
}

impl fmt::Debug for CustodyTable {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("CustodyTable")
      .field("capacity", &self.capacity())
      .field("len", &self.len())
      .finish()
  }
}
