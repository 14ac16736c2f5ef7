use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::day;
use crate::{
    ingestion::ExtractedPurchaseOrder,
    records::{Dated, Record, RecordId, Searchable},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceStatus {
    Paid,
    Pending,
    Overdue,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "Paid",
            InvoiceStatus::Pending => "Pending",
            InvoiceStatus::Overdue => "Overdue",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            InvoiceStatus::Paid => "bg-green-100 text-green-800",
            InvoiceStatus::Pending => "bg-yellow-100 text-yellow-800",
            InvoiceStatus::Overdue => "bg-red-100 text-red-800",
        }
    }
}

/// A previously issued invoice, listed under "Old Invoices".
#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub id: RecordId,
    pub invoice_number: String,
    pub company: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
}

impl Record for Invoice {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Dated for Invoice {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.company.as_str(), self.invoice_number.as_str()]
    }
}

pub fn sample_invoices() -> Vec<Invoice> {
    let invoice = |id, number: &str, company: &str, amount: i64, date, status| Invoice {
        id,
        invoice_number: number.to_string(),
        company: company.to_string(),
        amount: Decimal::from(amount),
        date,
        status,
    };

    vec![
        invoice(1, "INV-2025-001", "ABC Corporation Ltd", 45000, day(2025, 1, 15), InvoiceStatus::Paid),
        invoice(2, "INV-2025-002", "XYZ Industries", 32500, day(2025, 1, 20), InvoiceStatus::Pending),
        invoice(3, "INV-2025-003", "Tech Solutions Inc", 67800, day(2025, 1, 25), InvoiceStatus::Paid),
        invoice(4, "INV-2025-004", "Global Enterprises", 28900, day(2025, 1, 28), InvoiceStatus::Overdue),
        invoice(5, "INV-2024-089", "Smart Systems Pvt Ltd", 54200, day(2024, 12, 15), InvoiceStatus::Paid),
        invoice(6, "INV-2024-090", "Digital Solutions", 41600, day(2024, 12, 20), InvoiceStatus::Paid),
    ]
}

/// GST charged on generated invoices (18%).
pub fn gst_rate() -> Decimal {
    Decimal::new(18, 2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub id: u32,
    pub description: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub amount: Decimal,
}

impl LineItem {
    fn empty(id: u32) -> Self {
        Self {
            id,
            description: String::new(),
            quantity: Decimal::ZERO,
            rate: Decimal::ZERO,
            amount: Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    pub gst: Decimal,
    pub total: Decimal,
}

/// The invoice being edited on the "Generate New Invoice" screen.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDraft {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub due_date: Option<NaiveDate>,
    pub client_name: String,
    pub client_address: String,
    pub client_gst: String,
    pub items: Vec<LineItem>,
}

impl InvoiceDraft {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            invoice_number: "INV-2025-001".to_string(),
            date: today,
            due_date: None,
            client_name: String::new(),
            client_address: String::new(),
            client_gst: String::new(),
            items: vec![LineItem::empty(1)],
        }
    }

    pub fn add_item(&mut self) -> u32 {
        let id = self.items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
        self.items.push(LineItem::empty(id));
        id
    }

    /// Removes a line. The last remaining line is kept.
    pub fn remove_item(&mut self, id: u32) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|i| i.id != id);
        self.items.len() != before
    }

    /// Replaces a line's inputs and recomputes its amount. A line whose
    /// amount would overflow is left as it was.
    pub fn update_item(&mut self, id: u32, description: String, quantity: Decimal, rate: Decimal) -> bool {
        let Some(amount) = quantity.checked_mul(rate) else {
            return false;
        };
        match self.items.iter_mut().find(|i| i.id == id) {
            Some(item) => {
                item.description = description;
                item.quantity = quantity;
                item.rate = rate;
                item.amount = amount;
                true
            }
            None => false,
        }
    }

    pub fn totals(&self) -> InvoiceTotals {
        let subtotal = self
            .items
            .iter()
            .fold(Decimal::ZERO, |sum, i| sum.saturating_add(i.amount));
        let gst = subtotal.saturating_mul(gst_rate()).round_dp(2);
        InvoiceTotals {
            subtotal,
            gst,
            total: subtotal.saturating_add(gst),
        }
    }

    /// Fills the client block from an uploaded purchase order.
    pub fn apply_purchase_order(&mut self, po: ExtractedPurchaseOrder) {
        self.client_name = po.client_name;
        self.client_address = po.client_address;
        self.client_gst = po.client_gst;
    }
}
