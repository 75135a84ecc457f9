//! The intrusive slot record: payload plus both link pairs, fused together.
//!
//! The chain list (`next`/`prev`) and the age list (`after`/`before`) are
//! kept in the same record rather than split into side tables. Several
//! operations — Robin-Hood displacement, tail-compaction on remove — update
//! both lists in lockstep for the same slot, and keeping them co-located
//! avoids a second array lookup on every step.

use crate::bundle::Bundle;
use crate::bundle::SID_VACANT;
use crate::index::SlotIndex;

#[derive(Clone, Copy, Debug)]
pub(crate) struct Slot {
  pub(crate) bundle: Bundle,

  /// Collision-chain links. `next`/`prev` chain together every slot sharing
  /// this CID's home bucket; the head of a chain always sits at that bucket's
  /// home index.
  pub(crate) next: SlotIndex,
  pub(crate) prev: SlotIndex,

  /// Age-list links. `after`/`before` chain together every occupied slot in
  /// insertion order, independent of which bucket it belongs to.
  pub(crate) after: SlotIndex,
  pub(crate) before: SlotIndex,
}

impl Slot {
  pub(crate) const VACANT: Self = Self {
    bundle: Bundle {
      cid: 0,
      sid: SID_VACANT,
      retx_time: 0,
    },
    next: SlotIndex::NIL,
    prev: SlotIndex::NIL,
    after: SlotIndex::NIL,
    before: SlotIndex::NIL,
  };

  #[inline]
  pub(crate) const fn is_occupied(&self) -> bool {
    self.bundle.sid != SID_VACANT
  }
}
