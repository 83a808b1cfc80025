use std::io::Write;
use tempfile::NamedTempFile;

/// The reward screen's seed data: four cash scratch cards, three coupon
/// scratch cards, and the coupon catalog they unlock into.
pub const SEED_CATALOG: &str = "\
record, id, title, amount, code, unlocked
reward, 1, ₹50 Cashback, 50, ,
reward, 2, ₹25 Cashback, 25, ,
reward, 3, ₹100 Cashback, 100, ,
reward, 4, ₹75 Cashback, 75, ,
reward, 5, ₹50 Off on FASTag, , TAG50,
reward, 6, Flat 5% Cashback on UPI, , UPI5,
reward, 7, 20% Off on Bill Payment, , BILL20,
coupon, 1, 10% Off on Recharge, , RECH10, true
coupon, 2, ₹50 Off on FASTag, , TAG50, false
coupon, 3, Flat 5% Cashback on UPI, , UPI5, false
coupon, 4, 20% Off on Bill Payment, , BILL20, false
";

pub fn write_seed_catalog() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(SEED_CATALOG.as_bytes()).unwrap();
    file
}
