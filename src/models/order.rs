use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::day;
use crate::records::{Dated, Record, RecordId, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Received,
    Pending,
    Processing,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Received",
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
        }
    }

    /// Badge classes used by the listing.
    pub fn badge(&self) -> &'static str {
        match self {
            OrderStatus::Received => "bg-green-100 text-green-800",
            OrderStatus::Processing => "bg-blue-100 text-blue-800",
            OrderStatus::Pending => "bg-yellow-100 text-yellow-800",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: RecordId,
    pub order_number: String,
    pub supplier: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub items: u32,
    pub status: OrderStatus,
}

impl Record for Order {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Dated for Order {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Searchable for Order {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.supplier.as_str(), self.order_number.as_str()]
    }
}

pub fn sample_orders() -> Vec<Order> {
    let order = |id, number: &str, supplier: &str, amount: i64, date, items, status| Order {
        id,
        order_number: number.to_string(),
        supplier: supplier.to_string(),
        amount: Decimal::from(amount),
        date,
        items,
        status,
    };

    vec![
        order(1, "ORD-2025-001", "Steel Industries Ltd", 125000, day(2025, 1, 10), 15, OrderStatus::Received),
        order(2, "ORD-2025-002", "Raw Materials Corp", 89000, day(2025, 1, 18), 8, OrderStatus::Processing),
        order(3, "ORD-2025-003", "Global Supplies Inc", 156000, day(2025, 1, 22), 22, OrderStatus::Pending),
        order(4, "ORD-2025-004", "Industrial Solutions", 67500, day(2025, 1, 26), 12, OrderStatus::Received),
    ]
}
