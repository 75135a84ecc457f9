//! Slot indices and the `NIL` sentinel.

use core::fmt::Debug;
use core::fmt::Formatter;
use core::fmt::Result;

/// A raw offset into a table's backing slot array, or the sentinel [`NIL`].
///
/// Every intrusive link in [`Slot`](crate::slot::Slot) — chain `next`/`prev`
/// and age-list `after`/`before` — is one of these. Representing links as
/// plain integer offsets into a flat array, rather than as pointers to
/// heap-allocated nodes, is what lets the backing storage live in one
/// contiguous, pre-allocated buffer with no per-link allocation.
///
/// [`NIL`]: Self::NIL
#[derive(Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct SlotIndex(u32);

impl SlotIndex {
  /// The "no link" sentinel. Always outside `[0, capacity)` for any table
  /// whose capacity was validated through [`Capacity::new`].
  ///
  /// [`Capacity::new`]: crate::capacity::Capacity::new
  pub(crate) const NIL: Self = Self(u32::MAX);

  #[inline]
  pub(crate) const fn new(index: usize) -> Self {
    debug_assert!(index < u32::MAX as usize, "slot index exceeds NIL sentinel");
    Self(index as u32)
  }

  #[inline]
  pub(crate) const fn get(self) -> usize {
    self.0 as usize
  }

  #[inline]
  pub(crate) const fn is_nil(self) -> bool {
    self.0 == Self::NIL.0
  }
}

impl Debug for SlotIndex {
  fn fmt(&self, f: &mut Formatter<'_>) -> Result {
    if self.is_nil() {
      f.write_str("NIL")
    } else {
      Debug::fmt(&self.0, f)
    }
  }
}
