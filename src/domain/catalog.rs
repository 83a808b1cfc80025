use super::reward::{Coupon, EarnedCashback, Reward};

/// Holds the reward collections displayed by the presentation layer.
///
/// The catalog is a pure data container: all lifecycle rules live in the
/// engine. Collections preserve insertion order, which list displays and the
/// seed data rely on.
#[derive(Debug, Default, Clone)]
pub struct RewardCatalog {
    pending: Vec<Reward>,
    earned: Vec<EarnedCashback>,
    coupons: Vec<Coupon>,
}

impl RewardCatalog {
    pub fn new(pending: Vec<Reward>, coupons: Vec<Coupon>) -> Self {
        Self {
            pending,
            earned: Vec::new(),
            coupons,
        }
    }

    pub fn pending(&self) -> &[Reward] {
        &self.pending
    }

    pub fn earned(&self) -> &[EarnedCashback] {
        &self.earned
    }

    pub fn coupons(&self) -> &[Coupon] {
        &self.coupons
    }

    pub fn pending_mut(&mut self, id: &str) -> Option<&mut Reward> {
        self.pending.iter_mut().find(|r| r.id == id)
    }

    /// Removes and returns the reward with the given id, keeping the order of
    /// the remaining entries.
    pub fn take_pending(&mut self, id: &str) -> Option<Reward> {
        let index = self.pending.iter().position(|r| r.id == id)?;
        Some(self.pending.remove(index))
    }

    pub fn add_earned(&mut self, entry: EarnedCashback) {
        self.earned.push(entry);
    }

    /// Unlocks the coupon whose code matches. Returns `false` when no coupon
    /// carries the code, leaving the collection untouched.
    pub fn unlock_coupon(&mut self, code: &str) -> bool {
        match self.coupons.iter_mut().find(|c| c.code == code) {
            Some(coupon) => {
                coupon.unlock();
                true
            }
            None => false,
        }
    }
}
