//! Aggregate totals and their read-through cache.
//!
//! The cache holds at most one snapshot. Every write evicts it, and a
//! generation counter prevents a read that raced a write from storing totals
//! computed before that write.

use std::sync::{
    RwLock,
    atomic::{AtomicBool, AtomicU64, Ordering},
};

use crate::Money;

/// Totals over every stored transaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TotalsSnapshot {
    pub total_credit_amount: Money,
    pub total_debit_amount: Money,
    pub total_credit_count: u64,
    pub total_debit_count: u64,
    /// `total_credit_amount - total_debit_amount`, may be negative.
    pub net_amount: Money,
    pub total_transaction_count: u64,
}

impl TotalsSnapshot {
    /// Builds a snapshot from per-type sums; the derived fields follow.
    pub fn new(
        credit_amount: Money,
        debit_amount: Money,
        credit_count: u64,
        debit_count: u64,
    ) -> Self {
        Self {
            total_credit_amount: credit_amount,
            total_debit_amount: debit_amount,
            total_credit_count: credit_count,
            total_debit_count: debit_count,
            net_amount: credit_amount - debit_amount,
            total_transaction_count: credit_count + debit_count,
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalsCache {
    slot: RwLock<Option<TotalsSnapshot>>,
    generation: AtomicU64,
    enabled: AtomicBool,
}

impl TotalsCache {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            slot: RwLock::new(None),
            generation: AtomicU64::new(0),
            enabled: AtomicBool::new(enabled),
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Observe before computing; pass the value to [`Self::store`].
    pub(crate) fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub(crate) fn get(&self) -> Option<TotalsSnapshot> {
        if !self.is_enabled() {
            return None;
        }
        match self.slot.read() {
            Ok(slot) => *slot,
            Err(_) => {
                self.disable();
                None
            }
        }
    }

    /// Stores `snapshot` unless a write happened since `generation` was
    /// observed. Returns whether the snapshot was kept.
    pub(crate) fn store(&self, generation: u64, snapshot: TotalsSnapshot) -> bool {
        if !self.is_enabled() {
            return false;
        }
        match self.slot.write() {
            Ok(mut slot) => {
                if self.generation.load(Ordering::Acquire) != generation {
                    return false;
                }
                *slot = Some(snapshot);
                true
            }
            Err(_) => {
                self.disable();
                false
            }
        }
    }

    /// Call after every committed write, before acknowledging it.
    pub(crate) fn evict(&self) {
        self.generation.fetch_add(1, Ordering::AcqRel);
        if !self.is_enabled() {
            return;
        }
        match self.slot.write() {
            Ok(mut slot) => *slot = None,
            Err(_) => self.disable(),
        }
    }

    fn disable(&self) {
        if self.enabled.swap(false, Ordering::AcqRel) {
            tracing::warn!("totals cache lock poisoned, serving totals uncached from now on");
        }
    }
}
