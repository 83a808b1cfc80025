use super::reward::{Amount, RewardKind};
use serde::Serialize;

/// Display-tab hint emitted with each settlement. A UI suggestion only, not a
/// hard contract: the presentation layer may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardTab {
    Money,
    Coupons,
}

impl RewardTab {
    pub fn for_kind(kind: &RewardKind) -> Self {
        match kind {
            RewardKind::Cash { .. } => Self::Money,
            RewardKind::Coupon { .. } => Self::Coupons,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Money => "money",
            Self::Coupons => "coupons",
        }
    }
}

/// Outcome of a settlement as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettledKind {
    Cash { amount: Amount },
    /// `matched` is `false` when no catalog coupon carried the reward's code;
    /// the settlement is still reported since the reward left the pending set.
    Coupon { code: String, matched: bool },
}

/// Published after a reward settles, so the presentation layer can switch the
/// active tab and refresh its lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettledEvent {
    pub reward_id: String,
    pub kind: SettledKind,
    pub tab: RewardTab,
}
