use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::{day, required_amount};
use crate::records::{Dated, Record, RecordId, Searchable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialKind {
    Raw,
    Dispatch,
}

impl MaterialKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaterialKind::Raw => "Raw",
            MaterialKind::Dispatch => "Dispatch",
        }
    }

    /// Tab of the materials screen listing this kind.
    pub fn tab(&self) -> &'static str {
        match self {
            MaterialKind::Raw => "raw",
            MaterialKind::Dispatch => "dispatch",
        }
    }

    /// Unknown tabs fall back to raw materials.
    pub fn from_tab(tab: &str) -> Self {
        match tab {
            "dispatch" => MaterialKind::Dispatch,
            _ => MaterialKind::Raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub id: RecordId,
    pub name: String,
    pub kind: MaterialKind,
    pub quantity: u32,
    pub unit: String,
    pub price: Decimal,
    pub supplier: String,
    pub date: NaiveDate,
}

impl Material {
    /// Quantity widened for summing.
    pub fn total_quantity(&self) -> u64 {
        u64::from(self.quantity)
    }
}

impl Record for Material {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Dated for Material {
    fn date(&self) -> NaiveDate {
        self.date
    }
}

impl Searchable for Material {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.supplier.as_str()]
    }
}

pub const UNITS: [&str; 6] = ["kg", "pieces", "meters", "units", "liters", "tons"];

#[derive(Debug, Clone, Default)]
pub struct MaterialDraft {
    pub name: String,
    pub quantity: Option<u32>,
    pub unit: String,
    pub price: Option<Decimal>,
    pub supplier: String,
    pub date: Option<NaiveDate>,
}

impl MaterialDraft {
    /// Builds a material of `kind`, or `None` when name, quantity or price is
    /// missing or the price is out of range.
    pub fn build(self, kind: MaterialKind, today: NaiveDate) -> Option<Material> {
        let quantity = self.quantity.filter(|q| *q > 0)?;
        let price = required_amount(self.price)?;
        if self.name.trim().is_empty() {
            return None;
        }

        let unit = if self.unit.trim().is_empty() {
            "kg".to_string()
        } else {
            self.unit.trim().to_string()
        };

        Some(Material {
            id: 0,
            name: self.name.trim().to_string(),
            kind,
            quantity,
            unit,
            price,
            supplier: self.supplier.trim().to_string(),
            date: self.date.unwrap_or(today),
        })
    }
}

pub fn sample_materials() -> Vec<Material> {
    let material = |id, name: &str, kind, quantity, unit: &str, price: i64, supplier: &str, date| {
        Material {
            id,
            name: name.to_string(),
            kind,
            quantity,
            unit: unit.to_string(),
            price: Decimal::from(price),
            supplier: supplier.to_string(),
            date,
        }
    };

    vec![
        material(1, "Steel Sheets", MaterialKind::Raw, 500, "kg", 45000, "Steel Corp", day(2025, 1, 15)),
        material(2, "Aluminum Rods", MaterialKind::Raw, 200, "pieces", 25000, "Metal Works", day(2025, 1, 18)),
        material(3, "Finished Product A", MaterialKind::Dispatch, 100, "units", 80000, "Self", day(2025, 1, 20)),
        material(4, "Copper Wire", MaterialKind::Raw, 1000, "meters", 15000, "Wire Solutions", day(2025, 1, 22)),
        material(5, "Finished Product B", MaterialKind::Dispatch, 75, "units", 60000, "Self", day(2025, 1, 25)),
    ]
}
