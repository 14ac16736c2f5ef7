use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{day, required_amount};
use crate::{
    ingestion::ExtractedInputBill,
    records::{Dated, Record, RecordId, Searchable},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillKind {
    Document,
    Manual,
}

impl BillKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillKind::Document => "Document",
            BillKind::Manual => "Manual",
        }
    }

    pub fn tab(&self) -> &'static str {
        match self {
            BillKind::Document => "upload",
            BillKind::Manual => "manual",
        }
    }

    /// Unknown tabs fall back to uploaded documents.
    pub fn from_tab(tab: &str) -> Self {
        match tab {
            "manual" => BillKind::Manual,
            _ => BillKind::Document,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InputBill {
    pub id: RecordId,
    pub kind: BillKind,
    pub description: String,
    pub gst_amount: Decimal,
    pub date: NaiveDate,
    pub document_name: Option<String>,
    pub vendor: String,
}

impl Record for InputBill {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Dated for InputBill {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Searchable for InputBill {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.description.as_str(), self.vendor.as_str()]
    }
}

impl From<ExtractedInputBill> for InputBill {
    fn from(extracted: ExtractedInputBill) -> Self {
        Self {
            id: 0,
            kind: BillKind::Document,
            description: extracted.description,
            gst_amount: extracted.gst_amount,
            date: extracted.date,
            document_name: Some(extracted.document_name),
            vendor: extracted.vendor,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ManualBillDraft {
    pub description: String,
    pub gst_amount: Option<Decimal>,
    pub vendor: String,
    pub date: Option<NaiveDate>,
}

impl ManualBillDraft {
    /// Builds a manual GST entry, or `None` when description, amount or
    /// vendor is missing or the amount is out of range.
    pub fn build(self, today: NaiveDate) -> Option<InputBill> {
        let gst_amount = required_amount(self.gst_amount)?;
        if self.description.trim().is_empty() || self.vendor.trim().is_empty() {
            return None;
        }

        Some(InputBill {
            id: 0,
            kind: BillKind::Manual,
            description: self.description.trim().to_string(),
            gst_amount,
            date: self.date.unwrap_or(today),
            document_name: None,
            vendor: self.vendor.trim().to_string(),
        })
    }
}

pub fn sample_input_bills() -> Vec<InputBill> {
    let bill = |id, kind, description: &str, gst: i64, date, document: Option<&str>, vendor: &str| {
        InputBill {
            id,
            kind,
            description: description.to_string(),
            gst_amount: Decimal::from(gst),
            date,
            document_name: document.map(str::to_string),
            vendor: vendor.to_string(),
        }
    };

    vec![
        bill(1, BillKind::Document, "Raw material purchase", 8100, day(2025, 1, 15), Some("bill_001.pdf"), "Steel Corp"),
        bill(2, BillKind::Manual, "Service charges", 2160, day(2025, 1, 18), None, "Logistics Ltd"),
        bill(3, BillKind::Document, "Equipment maintenance", 5400, day(2025, 1, 20), Some("maintenance_bill.pdf"), "Service Center"),
        bill(4, BillKind::Manual, "Utility bills", 3240, day(2025, 1, 22), None, "Power Company"),
    ]
}
