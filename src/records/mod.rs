//! Dated, searchable record lists and the reductions every screen runs over
//! them.
//!
//! Screens keep their records in a [`RecordStore`], narrow them with
//! [`filter_by_month_and_search`] (or [`filter_by_month`] when the screen has
//! no search box) and build their summary tiles with [`aggregate`],
//! [`average`] and [`count_where`].

pub mod month;
pub mod store;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::iter::Sum;

pub use month::Month;
pub use store::RecordStore;

pub type RecordId = u32;

pub trait Record {
    fn id(&self) -> RecordId;
    fn set_id(&mut self, id: RecordId);
}

pub trait Dated {
    fn date(&self) -> NaiveDate;

    fn in_month(&self, month: &Month) -> bool {
        month.contains(self.date())
    }
}

pub trait Searchable {
    /// Fields the free-text search looks at.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        matches_lowercase(self, &needle)
    }
}

fn matches_lowercase<T: Searchable + ?Sized>(record: &T, needle: &str) -> bool {
    needle.is_empty()
        || record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
}

/// Records dated in `month`, in store order.
pub fn filter_by_month<'a, T>(records: &'a [T], month: Month) -> impl Iterator<Item = &'a T> + 'a
where
    T: Dated,
{
    records.iter().filter(move |r| r.in_month(&month))
}

/// Records dated in `month` whose search fields contain `term`, ignoring
/// case. An empty term keeps every record of the month.
pub fn filter_by_month_and_search<'a, T>(
    records: &'a [T],
    month: Month,
    term: &str,
) -> impl Iterator<Item = &'a T> + 'a
where
    T: Dated + Searchable,
{
    let needle = term.to_lowercase();
    filter_by_month(records, month).filter(move |r| matches_lowercase(*r, &needle))
}

/// Sum of `field` over `records`; zero for an empty set.
pub fn aggregate<'a, T, N, F>(records: impl IntoIterator<Item = &'a T>, field: F) -> N
where
    T: 'a,
    N: Sum<N>,
    F: Fn(&T) -> N,
{
    records.into_iter().map(field).sum()
}

/// Mean of `field` over `records`; zero for an empty set.
pub fn average<'a, T, F>(records: impl IntoIterator<Item = &'a T>, field: F) -> Decimal
where
    T: 'a,
    F: Fn(&T) -> Decimal,
{
    let (sum, count) = records
        .into_iter()
        .fold((Decimal::ZERO, 0u32), |(sum, count), r| (sum + field(r), count + 1));

    if count > 0 {
        (sum / Decimal::from(count)).round_dp(2)
    } else {
        Decimal::ZERO
    }
}

pub fn count_where<'a, T, F>(records: impl IntoIterator<Item = &'a T>, predicate: F) -> usize
where
    T: 'a,
    F: Fn(&T) -> bool,
{
    records.into_iter().filter(|r| predicate(*r)).count()
}
