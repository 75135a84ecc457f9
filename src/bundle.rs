//! The payload a [`CustodyTable`](crate::CustodyTable) stores.

/// The reserved `sid` value marking a slot as vacant.
///
/// Callers must never insert a [`Bundle`] carrying this value; [`add`] rejects
/// it with [`RhHashError::ParamError`].
///
/// [`add`]: crate::CustodyTable::add
/// [`RhHashError::ParamError`]: crate::RhHashError::ParamError
pub const SID_VACANT: u64 = u64::MAX;

/// An in-flight bundle awaiting custody acknowledgement.
///
/// The core treats this as an opaque triple: it never parses `sid` or
/// interprets `retx_time` beyond storing and returning them. Serialization,
/// storage-service I/O, and custody-block formatting all live above this
/// crate.
///
/// # Examples
///
/// ```
/// use rh_hash::Bundle;
///
/// let bundle = Bundle { cid: 1, sid: 42, retx_time: 1_000 };
/// assert_eq!(bundle.cid, 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bundle {
  /// Custody identifier: a monotonically growing integer assigned by the
  /// local custodian. Determines the bundle's home slot via `cid % capacity`.
  pub cid: u64,

  /// Storage identifier: an opaque handle into an external storage service.
  /// Must not equal [`SID_VACANT`].
  pub sid: u64,

  /// Retransmission deadline, in whatever time unit the caller uses.
  /// Opaque to the core; carried through unchanged.
  pub retx_time: u64,
}
