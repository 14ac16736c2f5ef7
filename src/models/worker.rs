use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use super::{day, required_amount};
use crate::records::{Month, Record, RecordId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerStatus {
    Active,
    Inactive,
}

impl WorkerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStatus::Active => "Active",
            WorkerStatus::Inactive => "Inactive",
        }
    }
}

impl FromStr for WorkerStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(WorkerStatus::Active),
            "Inactive" => Ok(WorkerStatus::Inactive),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Worker {
    pub id: RecordId,
    pub name: String,
    pub weekly_salary: Decimal,
    pub department: String,
    pub join_date: NaiveDate,
    pub status: WorkerStatus,
}

impl Worker {
    pub fn is_active(&self) -> bool {
        self.status == WorkerStatus::Active
    }

    /// Weekly salary times the pay weeks of `month`. Saturates instead of
    /// overflowing.
    pub fn monthly_pay(&self, month: &Month) -> Decimal {
        self.weekly_salary.saturating_mul(Decimal::from(month.weeks()))
    }
}

impl Record for Worker {
    fn id(&self) -> RecordId {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = id;
    }
}

/// Salary bill for `month`, counting active workers only.
pub fn monthly_payroll<'a>(workers: impl IntoIterator<Item = &'a Worker>, month: &Month) -> Decimal {
    workers
        .into_iter()
        .filter(|w| w.is_active())
        .fold(Decimal::ZERO, |total, w| total.saturating_add(w.monthly_pay(month)))
}

/// Values typed into the "Add Worker" form.
#[derive(Debug, Clone, Default)]
pub struct WorkerDraft {
    pub name: String,
    pub weekly_salary: Option<Decimal>,
    pub department: String,
    pub join_date: Option<NaiveDate>,
}

impl WorkerDraft {
    /// Builds the worker, or `None` when name, salary or department is
    /// missing or the salary is out of range. New workers start active.
    pub fn build(self, today: NaiveDate) -> Option<Worker> {
        let weekly_salary = required_amount(self.weekly_salary)?;
        if self.name.trim().is_empty() || self.department.trim().is_empty() {
            return None;
        }

        Some(Worker {
            id: 0,
            name: self.name.trim().to_string(),
            weekly_salary,
            department: self.department.trim().to_string(),
            join_date: self.join_date.unwrap_or(today),
            status: WorkerStatus::Active,
        })
    }
}

/// Inline edit of a worker; `None` fields keep their current value. A zero
/// or out-of-range salary is ignored.
#[derive(Debug, Clone, Default)]
pub struct WorkerPatch {
    pub name: Option<String>,
    pub department: Option<String>,
    pub weekly_salary: Option<Decimal>,
    pub status: Option<WorkerStatus>,
}

impl WorkerPatch {
    pub fn apply(self, worker: &mut Worker) {
        if let Some(name) = self.name {
            worker.name = name;
        }
        if let Some(department) = self.department {
            worker.department = department;
        }
        if let Some(weekly_salary) = required_amount(self.weekly_salary) {
            worker.weekly_salary = weekly_salary;
        }
        if let Some(status) = self.status {
            worker.status = status;
        }
    }
}

pub fn sample_workers() -> Vec<Worker> {
    let worker = |id, name: &str, salary: i64, department: &str, joined, status| Worker {
        id,
        name: name.to_string(),
        weekly_salary: Decimal::from(salary),
        department: department.to_string(),
        join_date: joined,
        status,
    };

    vec![
        worker(1, "Rajesh Kumar", 2500, "Production", day(2024, 6, 15), WorkerStatus::Active),
        worker(2, "Priya Sharma", 3000, "Quality Control", day(2024, 7, 1), WorkerStatus::Active),
        worker(3, "Amit Patel", 2200, "Packaging", day(2024, 8, 10), WorkerStatus::Active),
        worker(4, "Sunita Singh", 2800, "Maintenance", day(2024, 9, 5), WorkerStatus::Active),
        worker(5, "Vikash Yadav", 2400, "Production", day(2024, 10, 12), WorkerStatus::Inactive),
    ]
}
