use crate::error::RewardError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents a positive monetary amount carried by a cash reward.
///
/// This is a wrapper around `rust_decimal::Decimal` to enforce domain-specific rules
/// and provide type safety for cashback calculations.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self, RewardError> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(RewardError::Validation(
                "Amount must be positive".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = RewardError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for Decimal {
    fn from(amount: Amount) -> Self {
        amount.0
    }
}

/// The payout carried by a scratch-card reward: either cashback money or a
/// coupon unlock keyed by its code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Cash { amount: Amount },
    Coupon { code: String },
}

/// Lifecycle state of an unclaimed reward. A settled reward is removed from
/// the catalog, so absence stands in for the terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardState {
    #[default]
    Pending,
    Revealing,
}

/// A single unclaimed scratch-card entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reward {
    /// Stable unique identifier for the reward's lifetime.
    pub id: String,
    /// Display label, carried through from the seed data.
    pub title: String,
    pub kind: RewardKind,
    #[serde(skip)]
    pub state: RewardState,
}

impl Reward {
    pub fn cash(
        id: impl Into<String>,
        title: impl Into<String>,
        amount: Decimal,
    ) -> Result<Self, RewardError> {
        Ok(Self {
            id: id.into(),
            title: title.into(),
            kind: RewardKind::Cash {
                amount: Amount::new(amount)?,
            },
            state: RewardState::Pending,
        })
    }

    pub fn coupon(
        id: impl Into<String>,
        title: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            kind: RewardKind::Coupon { code: code.into() },
            state: RewardState::Pending,
        }
    }
}

/// A redeemable code entity whose unlock state is toggled by a matching
/// reward's settlement. The join key between reward and coupon is string
/// equality on `code`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coupon {
    pub id: String,
    pub title: String,
    pub code: String,
    pub unlocked: bool,
}

impl Coupon {
    pub fn locked(
        id: impl Into<String>,
        title: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            code: code.into(),
            unlocked: false,
        }
    }

    /// Flips the coupon to unlocked. The transition is one-way.
    pub fn unlock(&mut self) {
        self.unlocked = true;
    }
}

/// A credited cash settlement, appended to the earned list in settlement order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarnedCashback {
    pub id: String,
    pub amount: Amount,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_validation() {
        assert!(Amount::new(dec!(1.0)).is_ok());
        assert!(matches!(
            Amount::new(dec!(0.0)),
            Err(RewardError::Validation(_))
        ));
        assert!(matches!(
            Amount::new(dec!(-1.0)),
            Err(RewardError::Validation(_))
        ));
    }

    #[test]
    fn test_cash_reward_requires_positive_amount() {
        assert!(Reward::cash("1", "₹50 Cashback", dec!(50)).is_ok());
        assert!(Reward::cash("1", "bogus", dec!(-50)).is_err());
    }

    #[test]
    fn test_reward_starts_pending() {
        let reward = Reward::coupon("5", "₹50 Off on FASTag", "TAG50");
        assert_eq!(reward.state, RewardState::Pending);
        assert_eq!(
            reward.kind,
            RewardKind::Coupon {
                code: "TAG50".to_string()
            }
        );
    }

    #[test]
    fn test_coupon_unlock_is_one_way() {
        let mut coupon = Coupon::locked("2", "₹50 Off on FASTag", "TAG50");
        assert!(!coupon.unlocked);
        coupon.unlock();
        assert!(coupon.unlocked);
        coupon.unlock();
        assert!(coupon.unlocked);
    }
}
