pub mod eway_bill;
pub mod input_bill;
pub mod invoice;
pub mod material;
pub mod order;
pub mod tax_return;
pub mod worker;

use chrono::NaiveDate;
use rust_decimal::Decimal;

pub use eway_bill::EWayBill;
pub use input_bill::{BillKind, InputBill, ManualBillDraft};
pub use invoice::{Invoice, InvoiceDraft, InvoiceTotals};
pub use material::{Material, MaterialDraft, MaterialKind};
pub use order::Order;
pub use tax_return::{TaxReturn, TaxReturnStatus};
pub use worker::{Worker, WorkerDraft, WorkerPatch};

// Sample data only uses literal, valid dates.
fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Largest amount, salary, rate or quantity a form may enter. Sums and
/// products of values this size stay far inside `Decimal`'s range.
pub const MAX_FORM_VALUE: i64 = 1_000_000_000_000;

pub fn within_form_range(value: Decimal) -> bool {
    value.abs() <= Decimal::from(MAX_FORM_VALUE)
}

/// A required form amount: present, non-zero and within range.
pub fn required_amount(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| !v.is_zero() && within_form_range(*v))
}
