//! Validated, runtime table capacity.

use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result as FmtResult;

use crate::error::RhHashError;

/// A validated table capacity.
///
/// Unlike a compile-time-sized table, this crate's capacity is chosen at
/// construction time (it corresponds to a deployed agent's configured bundle
/// storage budget), so `Capacity` validates and carries a runtime `usize`
/// rather than a const generic.
///
/// # Construction
///
/// [`Capacity::new`] rejects capacities that cannot be represented: zero, or
/// large enough that the internal "no link" sentinel index would fall inside
/// `[0, capacity)`.
///
/// Unlike a power-of-two-rounded capacity, `Capacity` keeps the exact value
/// the caller requested. The table's hash function is `cid % capacity`, and
/// rounding to a power of two would make that modulus only ever see the CID's
/// low bits — a poor fit for the monotonically increasing, sequentially
/// assigned CIDs this table is built for.
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct Capacity(u32);

impl Capacity {
  /// The minimum supported capacity: 1 slot.
  pub const MIN: Self = Self(1);

  /// The maximum supported capacity: one less than [`u32::MAX`], leaving the
  /// top value free for the `NIL` sentinel.
  pub const MAX: Self = Self(u32::MAX - 1);

  /// Validates `value` as a table capacity.
  ///
  /// # Errors
  ///
  /// Returns [`RhHashError::ParamError`] if `value` is `0` or exceeds
  /// [`Capacity::MAX`].
  #[inline]
  pub fn new(value: usize) -> core::result::Result<Self, RhHashError> {
    if value == 0 {
      return Err(RhHashError::ParamError);
    }

    let Ok(value): core::result::Result<u32, _> = u32::try_from(value) else {
      return Err(RhHashError::ParamError);
    };

    if value > Self::MAX.0 {
      return Err(RhHashError::ParamError);
    }

    Ok(Self(value))
  }

  /// Returns the capacity as a [`usize`].
  #[inline]
  pub const fn as_usize(self) -> usize {
    self.0 as usize
  }
}

impl Debug for Capacity {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "Capacity({})", self.0)
  }
}
