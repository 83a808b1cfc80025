use crate::domain::ledger::Balance;
use crate::domain::reward::{Coupon, EarnedCashback, Reward};
use crate::error::Result;
use std::io::Write;

/// Writes the final engine state as CSV.
///
/// Rows share the seed catalog's column layout so the output can be diffed
/// against the input: a `total` row, then `earned`, `coupon`, and remaining
/// `pending` rows, each group in insertion order. Monetary values are printed
/// with two decimal places.
pub struct StateWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> StateWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::WriterBuilder::new().from_writer(sink),
        }
    }

    pub fn write_state(
        &mut self,
        total: Balance,
        earned: &[EarnedCashback],
        coupons: &[Coupon],
        pending: &[Reward],
    ) -> Result<()> {
        self.writer
            .write_record(["record", "id", "title", "amount", "code", "unlocked"])?;
        self.writer
            .write_record(["total", "", "", &format!("{:.2}", total.0), "", ""])?;

        for entry in earned {
            self.writer.write_record([
                "earned",
                &entry.id,
                "",
                &format!("{:.2}", entry.amount.value()),
                "",
                "",
            ])?;
        }
        for coupon in coupons {
            self.writer.write_record([
                "coupon",
                &coupon.id,
                &coupon.title,
                "",
                &coupon.code,
                if coupon.unlocked { "true" } else { "false" },
            ])?;
        }
        for reward in pending {
            self.writer
                .write_record(["pending", &reward.id, &reward.title, "", "", ""])?;
        }

        self.writer.flush()?;
        Ok(())
    }
}
