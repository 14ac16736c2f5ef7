use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::day;
use crate::{
    ingestion::ExtractedEWayBill,
    records::{Dated, Record, RecordId, Searchable},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EWayBillStatus {
    Active,
    Completed,
    Cancelled,
}

impl EWayBillStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EWayBillStatus::Active => "Active",
            EWayBillStatus::Completed => "Completed",
            EWayBillStatus::Cancelled => "Cancelled",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            EWayBillStatus::Active => "bg-green-100 text-green-800",
            EWayBillStatus::Completed => "bg-blue-100 text-blue-800",
            EWayBillStatus::Cancelled => "bg-red-100 text-red-800",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EWayBill {
    pub id: RecordId,
    pub bill_number: String,
    pub vehicle_number: String,
    pub destination: String,
    pub amount: Decimal,
    /// Kilometres.
    pub distance: u32,
    pub date: NaiveDate,
    pub document_name: String,
    pub status: EWayBillStatus,
}

impl EWayBill {
    pub fn is_active(&self) -> bool {
        self.status == EWayBillStatus::Active
    }
}

impl Record for EWayBill {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Dated for EWayBill {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Searchable for EWayBill {
    fn search_fields(&self) -> Vec<&str> {
        vec![
            self.bill_number.as_str(),
            self.vehicle_number.as_str(),
            self.destination.as_str(),
        ]
    }
}

impl From<ExtractedEWayBill> for EWayBill {
    fn from(extracted: ExtractedEWayBill) -> Self {
        Self {
            id: 0,
            bill_number: extracted.bill_number,
            vehicle_number: extracted.vehicle_number,
            destination: extracted.destination,
            amount: extracted.amount,
            distance: extracted.distance,
            date: extracted.date,
            document_name: extracted.document_name,
            status: EWayBillStatus::Active,
        }
    }
}

pub fn sample_eway_bills() -> Vec<EWayBill> {
    let bill = |id, number: &str, vehicle: &str, destination: &str, amount: i64, distance, date, document: &str, status| {
        EWayBill {
            id,
            bill_number: number.to_string(),
            vehicle_number: vehicle.to_string(),
            destination: destination.to_string(),
            amount: Decimal::from(amount),
            distance,
            date,
            document_name: document.to_string(),
            status,
        }
    };

    vec![
        bill(1, "EWB001234567890", "MH12AB1234", "Mumbai to Delhi", 125000, 1400, day(2025, 1, 15), "eway_001.pdf", EWayBillStatus::Completed),
        bill(2, "EWB001234567891", "GJ05CD5678", "Ahmedabad to Pune", 89000, 600, day(2025, 1, 18), "eway_002.pdf", EWayBillStatus::Active),
        bill(3, "EWB001234567892", "KA03EF9012", "Bangalore to Chennai", 156000, 350, day(2025, 1, 20), "eway_003.pdf", EWayBillStatus::Completed),
        bill(4, "EWB001234567893", "TN09GH3456", "Chennai to Hyderabad", 67500, 450, day(2025, 1, 22), "eway_004.pdf", EWayBillStatus::Active),
    ]
}
