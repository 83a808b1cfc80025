use crate::domain::catalog::RewardCatalog;
use crate::domain::reward::{Coupon, Reward};
use crate::error::{Result, RewardError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashSet;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Reward,
    Coupon,
}

/// One row of a seed catalog file.
///
/// Reward rows carry exactly one of `amount` (cash) or `code` (coupon unlock).
/// Coupon rows carry `code` and an optional `unlocked` flag (default locked).
#[derive(Debug, Deserialize, Clone)]
pub struct CatalogRecord {
    pub record: RecordKind,
    pub id: String,
    pub title: String,
    pub amount: Option<Decimal>,
    pub code: Option<String>,
    pub unlocked: Option<bool>,
}

/// Reads a seed catalog from a CSV source.
///
/// This reader wraps `csv::Reader` and handles whitespace trimming and
/// flexible record lengths automatically.
pub struct CatalogReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CatalogReader<R> {
    /// Creates a new `CatalogReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Consumes the reader and builds the seeded catalog, preserving row order.
    pub fn load(self) -> Result<RewardCatalog> {
        let mut pending = Vec::new();
        let mut coupons = Vec::new();
        let mut reward_ids = HashSet::new();

        for result in self.reader.into_deserialize::<CatalogRecord>() {
            let record = result?;
            match record.record {
                RecordKind::Reward => {
                    if !reward_ids.insert(record.id.clone()) {
                        return Err(RewardError::Validation(format!(
                            "duplicate reward id '{}'",
                            record.id
                        )));
                    }
                    let reward = match (record.amount, record.code) {
                        (Some(amount), None) => Reward::cash(record.id, record.title, amount)?,
                        (None, Some(code)) => Reward::coupon(record.id, record.title, code),
                        _ => {
                            return Err(RewardError::Validation(format!(
                                "reward '{}' must carry exactly one of amount or code",
                                record.id
                            )));
                        }
                    };
                    pending.push(reward);
                }
                RecordKind::Coupon => {
                    let Some(code) = record.code else {
                        return Err(RewardError::Validation(format!(
                            "coupon '{}' is missing its code",
                            record.id
                        )));
                    };
                    let mut coupon = Coupon::locked(record.id, record.title, code);
                    coupon.unlocked = record.unlocked.unwrap_or(false);
                    coupons.push(coupon);
                }
            }
        }

        Ok(RewardCatalog::new(pending, coupons))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reward::RewardKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_load_valid_catalog() {
        let data = "record, id, title, amount, code, unlocked\n\
                    reward, 1, ₹50 Cashback, 50, ,\n\
                    reward, 5, ₹50 Off on FASTag, , TAG50,\n\
                    coupon, 1, 10% Off on Recharge, , RECH10, true\n\
                    coupon, 2, ₹50 Off on FASTag, , TAG50, false";
        let catalog = CatalogReader::new(data.as_bytes()).load().unwrap();

        assert_eq!(catalog.pending().len(), 2);
        assert_eq!(catalog.pending()[0].id, "1");
        assert_eq!(
            catalog.pending()[0].kind,
            RewardKind::Cash {
                amount: dec!(50).try_into().unwrap()
            }
        );
        assert_eq!(
            catalog.pending()[1].kind,
            RewardKind::Coupon {
                code: "TAG50".to_string()
            }
        );

        assert_eq!(catalog.coupons().len(), 2);
        assert!(catalog.coupons()[0].unlocked);
        assert!(!catalog.coupons()[1].unlocked);
    }

    #[test]
    fn test_reward_row_with_both_amount_and_code_is_rejected() {
        let data = "record, id, title, amount, code, unlocked\n\
                    reward, 1, bogus, 50, TAG50,";
        let result = CatalogReader::new(data.as_bytes()).load();
        assert!(matches!(result, Err(RewardError::Validation(_))));
    }

    #[test]
    fn test_reward_row_with_neither_amount_nor_code_is_rejected() {
        let data = "record, id, title, amount, code, unlocked\n\
                    reward, 1, bogus, , ,";
        let result = CatalogReader::new(data.as_bytes()).load();
        assert!(matches!(result, Err(RewardError::Validation(_))));
    }

    #[test]
    fn test_duplicate_reward_id_is_rejected() {
        let data = "record, id, title, amount, code, unlocked\n\
                    reward, 1, ₹50 Cashback, 50, ,\n\
                    reward, 1, ₹25 Cashback, 25, ,";
        let result = CatalogReader::new(data.as_bytes()).load();
        assert!(matches!(result, Err(RewardError::Validation(_))));
    }

    #[test]
    fn test_coupon_row_without_code_is_rejected() {
        let data = "record, id, title, amount, code, unlocked\n\
                    coupon, 1, 10% Off on Recharge, , , true";
        let result = CatalogReader::new(data.as_bytes()).load();
        assert!(matches!(result, Err(RewardError::Validation(_))));
    }

    #[test]
    fn test_non_positive_cash_amount_is_rejected() {
        let data = "record, id, title, amount, code, unlocked\n\
                    reward, 1, bogus, -50, ,";
        let result = CatalogReader::new(data.as_bytes()).load();
        assert!(matches!(result, Err(RewardError::Validation(_))));
    }

    #[test]
    fn test_malformed_row_is_a_csv_error() {
        let data = "record, id, title, amount, code, unlocked\n\
                    giveaway, 1, bogus, 50, ,";
        let result = CatalogReader::new(data.as_bytes()).load();
        assert!(matches!(result, Err(RewardError::Csv(_))));
    }
}
