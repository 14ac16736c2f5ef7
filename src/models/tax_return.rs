use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::day;
use crate::records::{Dated, Month, Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxReturnKind {
    Gstr1,
    Gstr3b,
    Itr,
    Tds,
}

impl TaxReturnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxReturnKind::Gstr1 => "GSTR-1",
            TaxReturnKind::Gstr3b => "GSTR-3B",
            TaxReturnKind::Itr => "ITR",
            TaxReturnKind::Tds => "TDS",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxReturnStatus {
    Filed,
    Pending,
    Draft,
}

impl TaxReturnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxReturnStatus::Filed => "Filed",
            TaxReturnStatus::Pending => "Pending",
            TaxReturnStatus::Draft => "Draft",
        }
    }

    pub fn badge(&self) -> &'static str {
        match self {
            TaxReturnStatus::Filed => "bg-green-100 text-green-800",
            TaxReturnStatus::Pending => "bg-yellow-100 text-yellow-800",
            TaxReturnStatus::Draft => "bg-blue-100 text-blue-800",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaxReturn {
    pub id: RecordId,
    /// `YYYY-MM` for monthly returns, `YYYY-FY` for annual ones.
    pub period: String,
    pub kind: TaxReturnKind,
    pub status: TaxReturnStatus,
    pub due_date: NaiveDate,
    pub filed_date: Option<NaiveDate>,
    pub amount: Decimal,
}

impl TaxReturn {
    pub fn is_filed(&self) -> bool {
        self.status == TaxReturnStatus::Filed
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_filed() && self.due_date < today
    }

    pub fn is_annual(&self) -> bool {
        self.period.contains("FY")
    }
}

impl Record for TaxReturn {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

impl Dated for TaxReturn {
    fn date(&self) -> NaiveDate {
        self.due_date
    }

    // Returns belong to their filing period, and annual returns show in
    // every month.
    fn in_month(&self, month: &Month) -> bool {
        self.period.starts_with(&month.to_string()) || self.is_annual()
    }
}

pub fn sample_tax_returns() -> Vec<TaxReturn> {
    let tax_return = |id, period: &str, kind, status, due, filed, amount: i64| TaxReturn {
        id,
        period: period.to_string(),
        kind,
        status,
        due_date: due,
        filed_date: filed,
        amount: Decimal::from(amount),
    };

    vec![
        tax_return(1, "2025-01", TaxReturnKind::Gstr1, TaxReturnStatus::Filed, day(2025, 2, 11), Some(day(2025, 2, 8)), 45000),
        tax_return(2, "2025-01", TaxReturnKind::Gstr3b, TaxReturnStatus::Pending, day(2025, 2, 20), None, 32000),
        tax_return(3, "2024-12", TaxReturnKind::Gstr1, TaxReturnStatus::Filed, day(2025, 1, 11), Some(day(2025, 1, 10)), 38000),
        tax_return(4, "2024-12", TaxReturnKind::Gstr3b, TaxReturnStatus::Filed, day(2025, 1, 20), Some(day(2025, 1, 18)), 28000),
        tax_return(5, "2024-FY", TaxReturnKind::Itr, TaxReturnStatus::Draft, day(2025, 7, 31), None, 125000),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{aggregate, count_where, filter_by_month};

    #[test]
    fn period_filter_keeps_annual_returns() {
        let returns = sample_tax_returns();
        let january: Vec<_> = filter_by_month(&returns, Month::new(2025, 1).unwrap()).collect();

        let ids: Vec<_> = january.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 5]);

        let total: Decimal = aggregate(january.iter().copied(), |r| r.amount);
        assert_eq!(total, Decimal::from(202000));
        assert_eq!(count_where(january.iter().copied(), TaxReturn::is_filed), 1);
        assert_eq!(
            count_where(january.iter().copied(), |r| r.status == TaxReturnStatus::Pending),
            1
        );

        let march: Vec<_> = filter_by_month(&returns, Month::new(2025, 3).unwrap()).collect();
        assert_eq!(march.len(), 1);
        assert!(march[0].is_annual());
    }

    #[test]
    fn overdue_only_when_unfiled_and_past_due() {
        let returns = sample_tax_returns();
        let late = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let early = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

        assert!(!returns[0].is_overdue(late));
        assert!(returns[1].is_overdue(late));
        assert!(!returns[1].is_overdue(early));
    }
}
