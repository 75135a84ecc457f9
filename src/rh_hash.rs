//! The dual-ordered, open-addressed, Robin-Hood-displacing hash table core.
//!
//! This is the hard part the crate exists for: [`RhHash`] maintains two
//! doubly-linked intrusive lists over the same backing array — the per-bucket
//! collision chain (`next`/`prev`) and the global age list (`after`/`before`)
//! — and keeps both consistent across insertion, Robin-Hood displacement, and
//! tail-compacted removal. See the crate-level docs for the invariants this
//! module upholds.

use crate::bundle::Bundle;
use crate::bundle::SID_VACANT;
use crate::capacity::Capacity;
use crate::error::RhHashError;
use crate::index::SlotIndex;
use crate::slot::Slot;

pub(crate) struct RhHash {
  slots: Vec<Slot>,
  capacity: Capacity,
  num_entries: u32,
  oldest: SlotIndex,
  newest: SlotIndex,
}

impl RhHash {
  pub(crate) fn new(capacity: Capacity) -> Self {
    Self {
      slots: vec![Slot::VACANT; capacity.as_usize()],
      capacity,
      num_entries: 0,
      oldest: SlotIndex::NIL,
      newest: SlotIndex::NIL,
    }
  }

  #[inline]
  pub(crate) const fn capacity(&self) -> usize {
    self.capacity.as_usize()
  }

  #[inline]
  pub(crate) const fn count(&self) -> usize {
    self.num_entries as usize
  }

  #[inline]
  pub(crate) const fn is_empty(&self) -> bool {
    self.num_entries == 0
  }

  #[inline]
  pub(crate) fn available(&self) -> Result<(), RhHashError> {
    if self.count() < self.capacity() {
      Ok(())
    } else {
      Err(RhHashError::TableFull)
    }
  }

  #[inline]
  fn home(&self, cid: u64) -> SlotIndex {
    SlotIndex::new((cid % self.capacity() as u64) as usize)
  }

  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
  pub(crate) fn add(&mut self, bundle: Bundle, overwrite: bool) -> Result<(), RhHashError> {
    if bundle.sid == SID_VACANT {
      return Err(RhHashError::ParamError);
    }

    let home: SlotIndex = self.home(bundle.cid);

    if !self.slots[home.get()].is_occupied() {
      self.slots[home.get()].bundle = bundle;
      self.slots[home.get()].next = SlotIndex::NIL;
      self.slots[home.get()].prev = SlotIndex::NIL;
      self.append_age_tail(home);
      self.num_entries += 1;
      return Ok(());
    }

    // Walk the chain rooted at `home`, looking for an existing entry. If
    // `home` currently holds an interloper (its `prev` is non-nil — a tail or
    // interior node of some *other* bucket's chain), this walk only sees the
    // interloper's own forward links, which can never match `bundle.cid`:
    // invariant (3) guarantees that if `bundle.cid` were already present, its
    // bucket's head would sit at `home`, and a slot holds one entry at a time.
    let mut end: SlotIndex = home;

    loop {
      if self.slots[end.get()].bundle.cid == bundle.cid {
        return self.overwrite_at(end, bundle, overwrite);
      }

      let next: SlotIndex = self.slots[end.get()].next;

      if next.is_nil() {
        break;
      }

      end = next;
    }

    let open: SlotIndex = self.probe_vacant(home)?;

    if self.slots[home.get()].prev.is_nil() {
      self.install_chain_tail(end, open, bundle);
    } else {
      self.displace_interloper(home, open, bundle);
    }

    self.num_entries += 1;

    Ok(())
  }

  /// Chain-head case (including a single-element chain): `home` genuinely
  /// owns its bucket. Append the new entry at `open` as the chain's new tail.
  fn install_chain_tail(&mut self, end: SlotIndex, open: SlotIndex, bundle: Bundle) {
    self.slots[end.get()].next = open;
    self.slots[open.get()].prev = end;
    self.slots[open.get()].next = SlotIndex::NIL;
    self.slots[open.get()].bundle = bundle;
    self.append_age_tail(open);
  }

  /// Robin-Hood case: `home` is occupied by a tail/interior node of some
  /// other bucket's chain. Relocate that occupant to `open`, preserving its
  /// chain and age-list position, then install the new entry at `home` as a
  /// fresh single-element chain — restoring invariant (3).
  fn displace_interloper(&mut self, home: SlotIndex, open: SlotIndex, bundle: Bundle) {
    let old_next: SlotIndex = self.slots[home.get()].next;
    let old_prev: SlotIndex = self.slots[home.get()].prev;

    self.slots[open.get()] = self.slots[home.get()];
    self.slots[open.get()].prev = old_prev;
    self.slots[open.get()].next = old_next;

    // `old_prev` is never nil here: we are in the branch where
    // `prev(home) != NIL`.
    self.slots[old_prev.get()].next = open;

    if !old_next.is_nil() {
      self.slots[old_next.get()].prev = open;
    }

    self.repoint_age_neighbors(open);

    #[cfg(feature = "tracing")]
    tracing::debug!(from = home.get(), to = open.get(), "displaced interloper");

    self.slots[home.get()].bundle = bundle;
    self.slots[home.get()].next = SlotIndex::NIL;
    self.slots[home.get()].prev = SlotIndex::NIL;
    self.append_age_tail(home);
  }

  fn overwrite_at(&mut self, idx: SlotIndex, bundle: Bundle, overwrite: bool) -> Result<(), RhHashError> {
    if !overwrite {
      return Err(RhHashError::DuplicateCid { cid: bundle.cid });
    }

    self.slots[idx.get()].bundle = bundle;
    self.unlink_age(idx);
    self.append_age_tail(idx);

    Ok(())
  }

  /// Linearly probes `(home+1) mod N, (home+2) mod N, ...` for a vacant slot,
  /// wrapping back to `home` at most once.
  fn probe_vacant(&self, home: SlotIndex) -> Result<SlotIndex, RhHashError> {
    let capacity: usize = self.capacity();
    let mut probe: usize = (home.get() + 1) % capacity;

    while probe != home.get() {
      if !self.slots[probe].is_occupied() {
        return Ok(SlotIndex::new(probe));
      }

      probe = (probe + 1) % capacity;
    }

    #[cfg(feature = "tracing")]
    tracing::warn!(capacity, "table full");

    Err(RhHashError::TableFull)
  }

  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
  pub(crate) fn remove(&mut self, cid: u64) -> Result<Bundle, RhHashError> {
    let home: SlotIndex = self.home(cid);

    if !self.slots[home.get()].is_occupied() {
      return Err(RhHashError::CidNotFound { cid: Some(cid) });
    }

    let mut victim: SlotIndex = home;

    loop {
      if self.slots[victim.get()].bundle.cid == cid {
        break;
      }

      let next: SlotIndex = self.slots[victim.get()].next;

      if next.is_nil() {
        return Err(RhHashError::CidNotFound { cid: Some(cid) });
      }

      victim = next;
    }

    let removed: Bundle = self.slots[victim.get()].bundle;

    self.unlink_age(victim);

    let mut end: SlotIndex = victim;

    while !self.slots[end.get()].next.is_nil() {
      end = self.slots[end.get()].next;
    }

    if end != victim {
      // Compact with the chain's tail, not its head: the tail's CID shares
      // `victim`'s home bucket (invariant 4), so moving it into `victim`
      // preserves invariant (3) without re-probing.
      self.slots[victim.get()].bundle = self.slots[end.get()].bundle;
      self.slots[victim.get()].after = self.slots[end.get()].after;
      self.slots[victim.get()].before = self.slots[end.get()].before;
      self.repoint_age_neighbors(victim);
    }

    let end_prev: SlotIndex = self.slots[end.get()].prev;

    self.slots[end.get()] = Slot::VACANT;

    if !end_prev.is_nil() {
      self.slots[end_prev.get()].next = SlotIndex::NIL;
    }

    self.num_entries -= 1;

    Ok(removed)
  }

  #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
  pub(crate) fn oldest(&self) -> Result<Bundle, RhHashError> {
    if self.oldest.is_nil() {
      return Err(RhHashError::CidNotFound { cid: None });
    }

    Ok(self.slots[self.oldest.get()].bundle)
  }

  /// Unlinks `idx` from the age list, repairing `oldest`/`newest` as needed.
  /// Does not touch `idx`'s own `after`/`before` fields; callers either
  /// overwrite them immediately (move-to-tail) or discard the slot.
  fn unlink_age(&mut self, idx: SlotIndex) {
    let before: SlotIndex = self.slots[idx.get()].before;
    let after: SlotIndex = self.slots[idx.get()].after;

    if before.is_nil() {
      self.oldest = after;
    } else {
      self.slots[before.get()].after = after;
    }

    if after.is_nil() {
      self.newest = before;
    } else {
      self.slots[after.get()].before = before;
    }
  }

  /// Appends `idx` to the tail of the age list as a brand-new entry.
  fn append_age_tail(&mut self, idx: SlotIndex) {
    let previous_newest: SlotIndex = self.newest;

    self.slots[idx.get()].before = previous_newest;
    self.slots[idx.get()].after = SlotIndex::NIL;

    if previous_newest.is_nil() {
      self.oldest = idx;
    } else {
      self.slots[previous_newest.get()].after = idx;
    }

    self.newest = idx;
  }

  /// Re-points the age-list neighbours (and `oldest`/`newest` anchors) of
  /// whatever slot used to sit where `idx`'s `before`/`after` say it did, at
  /// `idx` itself. Used when a slot's *contents* relocate but its *position*
  /// in the age list must not change — Robin-Hood displacement and
  /// tail-compaction on remove.
  fn repoint_age_neighbors(&mut self, idx: SlotIndex) {
    let before: SlotIndex = self.slots[idx.get()].before;
    let after: SlotIndex = self.slots[idx.get()].after;

    if before.is_nil() {
      self.oldest = idx;
    } else {
      self.slots[before.get()].after = idx;
    }

    if after.is_nil() {
      self.newest = idx;
    } else {
      self.slots[after.get()].before = idx;
    }
  }
}
