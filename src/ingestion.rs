//! Field extraction for uploaded documents.
//!
//! Upload handlers only ever see a file's name; whatever reads the document
//! sits behind [`DocumentIngestion`]. [`SimulatedIngestion`] stands in for a
//! real parser by inventing plausible values.

use chrono::NaiveDate;
use rand::Rng;
use rust_decimal::Decimal;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedInputBill {
    pub description: String,
    pub vendor: String,
    pub gst_amount: Decimal,
    pub date: NaiveDate,
    pub document_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedEWayBill {
    pub bill_number: String,
    pub vehicle_number: String,
    pub destination: String,
    pub amount: Decimal,
    pub distance: u32,
    pub date: NaiveDate,
    pub document_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPurchaseOrder {
    pub client_name: String,
    pub client_address: String,
    pub client_gst: String,
}

pub trait DocumentIngestion: Send + Sync {
    fn input_bill(&self, file_name: &str, today: NaiveDate) -> ExtractedInputBill;
    fn eway_bill(&self, file_name: &str, today: NaiveDate) -> ExtractedEWayBill;
    fn purchase_order(&self, file_name: &str) -> ExtractedPurchaseOrder;
}

/// Extensions each upload control accepts.
pub const INPUT_BILL_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];
pub const EWAY_BILL_EXTENSIONS: &[&str] = &["pdf"];
pub const ORDER_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xlsx"];
pub const PURCHASE_ORDER_EXTENSIONS: &[&str] = &["pdf"];

pub fn has_extension(file_name: &str, accepted: &[&str]) -> bool {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| accepted.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedIngestion;

impl DocumentIngestion for SimulatedIngestion {
    fn input_bill(&self, file_name: &str, today: NaiveDate) -> ExtractedInputBill {
        let mut rng = rand::rng();
        ExtractedInputBill {
            description: format!("Document upload - {}", file_name),
            vendor: "Auto-detected vendor".to_string(),
            gst_amount: Decimal::from(rng.random_range(1000..=10999i64)),
            date: today,
            document_name: file_name.to_string(),
        }
    }

    fn eway_bill(&self, file_name: &str, today: NaiveDate) -> ExtractedEWayBill {
        let mut rng = rand::rng();
        let serial: u64 = rng.random_range(0..1_000_000_000_000);
        ExtractedEWayBill {
            bill_number: format!("EWB{:012}", serial),
            vehicle_number: format!("MH12XY{}", rng.random_range(1000..=9999u32)),
            destination: "Auto-detected destination".to_string(),
            amount: Decimal::from(rng.random_range(50_000..=249_999i64)),
            distance: rng.random_range(100..=1599),
            date: today,
            document_name: file_name.to_string(),
        }
    }

    fn purchase_order(&self, _file_name: &str) -> ExtractedPurchaseOrder {
        ExtractedPurchaseOrder {
            client_name: "Sample Client Corp".to_string(),
            client_address: "123 Business Street, City, State - 123456".to_string(),
            client_gst: "GST123456789".to_string(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
    }

    #[test]
    fn simulated_input_bill_stays_in_range() {
        for _ in 0..50 {
            let bill = SimulatedIngestion.input_bill("bill.pdf", today());
            assert!(bill.gst_amount >= Decimal::from(1000));
            assert!(bill.gst_amount <= Decimal::from(10999));
            assert_eq!(bill.description, "Document upload - bill.pdf");
            assert_eq!(bill.document_name, "bill.pdf");
            assert_eq!(bill.date, today());
        }
    }

    #[test]
    fn simulated_eway_bill_shapes_numbers() {
        for _ in 0..50 {
            let bill = SimulatedIngestion.eway_bill("route.pdf", today());
            assert!(bill.bill_number.starts_with("EWB"));
            assert_eq!(bill.bill_number.len(), 15);
            assert!(bill.vehicle_number.starts_with("MH12XY"));
            assert_eq!(bill.vehicle_number.len(), 10);
            assert!((100..=1599).contains(&bill.distance));
            assert!(bill.amount >= Decimal::from(50_000));
            assert!(bill.amount <= Decimal::from(249_999));
        }
    }

    #[test]
    fn extension_check_ignores_case() {
        assert!(has_extension("scan.PDF", EWAY_BILL_EXTENSIONS));
        assert!(has_extension("photo.jpeg", INPUT_BILL_EXTENSIONS));
        assert!(!has_extension("photo.jpeg", EWAY_BILL_EXTENSIONS));
        assert!(!has_extension("noextension", ORDER_EXTENSIONS));
        assert!(has_extension("plan.xlsx", ORDER_EXTENSIONS));
    }
}
