use super::reward::Amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Sub, SubAssign};

/// Represents a running cashback balance with two decimal places of display
/// precision.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Amount> for Balance {
    fn from(amount: Amount) -> Self {
        Self(amount.value())
    }
}

impl Add for Balance {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Balance {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Balance {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Balance {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

/// Running total of credited cashback currency.
///
/// The total never decreases. It is credited exclusively by the engine's
/// settlement path; no other component writes to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CashbackLedger {
    total: Balance,
}

impl CashbackLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts the ledger at a previously earned balance.
    pub fn with_opening(total: Balance) -> Self {
        Self { total }
    }

    pub fn credit(&mut self, amount: Amount) {
        self.total += amount.into();
    }

    pub fn total(&self) -> Balance {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_balance_arithmetic() {
        let b1 = Balance::new(dec!(10.0));
        let b2 = Balance::new(dec!(5.0));
        assert_eq!(b1 + b2, Balance::new(dec!(15.0)));
        assert_eq!(b1 - b2, Balance::new(dec!(5.0)));
    }

    #[test]
    fn test_ledger_starts_at_zero() {
        assert_eq!(CashbackLedger::new().total(), Balance::ZERO);
    }

    #[test]
    fn test_ledger_credit_accumulates() {
        let mut ledger = CashbackLedger::with_opening(Balance::new(dec!(542.75)));
        ledger.credit(Amount::new(dec!(50)).unwrap());
        assert_eq!(ledger.total(), Balance::new(dec!(592.75)));

        ledger.credit(Amount::new(dec!(25)).unwrap());
        assert_eq!(ledger.total(), Balance::new(dec!(617.75)));
    }

    #[test]
    fn test_ledger_preserves_currency_precision() {
        let mut ledger = CashbackLedger::new();
        ledger.credit(Amount::new(dec!(0.01)).unwrap());
        ledger.credit(Amount::new(dec!(0.02)).unwrap());
        assert_eq!(ledger.total(), Balance::new(dec!(0.03)));
    }
}
