use crate::models::Stall;

/// Client-local, unconfirmed set of stalls the user intends to lock.
/// Keyed by stall id; the running total is recomputed wholesale on every
/// mutation rather than patched incrementally, so it can never drift.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    stalls: Vec<Stall>,
    total_amount: i64,
}

impl Selection {
    /// Replaces the selection wholesale. Non-bookable stalls are dropped;
    /// they must never enter a selection.
    pub fn set(&mut self, stalls: Vec<Stall>) {
        self.stalls = stalls
            .into_iter()
            .filter(|s| s.status.is_bookable())
            .collect();
        self.recompute();
    }

    /// Adds the stall if absent, removes it if present. Adding a stall that
    /// is booked or held elsewhere is a silent no-op.
    pub fn toggle(&mut self, stall: &Stall) {
        if let Some(position) = self
            .stalls
            .iter()
            .position(|s| s.stall_id == stall.stall_id)
        {
            self.stalls.remove(position);
        } else {
            if !stall.status.is_bookable() {
                return;
            }
            self.stalls.push(stall.clone());
        }
        self.recompute();
    }

    pub fn clear(&mut self) {
        self.stalls.clear();
        self.total_amount = 0;
    }

    fn recompute(&mut self) {
        self.total_amount = self.stalls.iter().map(Stall::price).sum();
    }

    pub fn stalls(&self) -> &[Stall] {
        &self.stalls
    }

    pub fn stall_ids(&self) -> Vec<String> {
        self.stalls.iter().map(|s| s.stall_id.clone()).collect()
    }

    pub fn contains(&self, stall_id: &str) -> bool {
        self.stalls.iter().any(|s| s.stall_id == stall_id)
    }

    pub fn is_empty(&self) -> bool {
        self.stalls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.stalls.len()
    }

    /// Σ category price over the selection, whole rupees, missing price = 0.
    pub fn total_amount(&self) -> i64 {
        self.total_amount
    }
}
