use axum::{
    extract::{Query, State},
    response::Html,
};
use askama::Template;
use rust_decimal::Decimal;
use tower_cookies::Cookies;

use crate::{
    error::AppResult,
    filters,
    handlers::{today, ListQuery, Shell},
    models::{TaxReturn, TaxReturnStatus},
    records::{aggregate, count_where, filter_by_month, Month},
    state::AppState,
};

pub struct ReturnRow {
    pub tax_return: TaxReturn,
    pub overdue: bool,
}

#[derive(Template)]
#[template(path = "tax_filing.html")]
struct TaxFilingTemplate {
    shell: Shell,
    month: Month,
    rows: Vec<ReturnRow>,
    total_tax: Decimal,
    filed_count: usize,
    pending_count: usize,
    upcoming: Vec<TaxReturn>,
}

pub async fn tax_filing(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let today = today();

    let (returns, mut upcoming): (Vec<TaxReturn>, Vec<TaxReturn>) = {
        let store = state.tax_returns.read().await;
        let returns = filter_by_month(store.all(), month).cloned().collect();
        let upcoming = store.all().iter().filter(|r| !r.is_filed()).cloned().collect();
        (returns, upcoming)
    };
    upcoming.sort_by_key(|r| r.due_date);

    let template = TaxFilingTemplate {
        shell: Shell::load(&state, &cookies, "Tax Filing").await,
        total_tax: aggregate(&returns, |r| r.amount),
        filed_count: count_where(&returns, |r| r.status == TaxReturnStatus::Filed),
        pending_count: count_where(&returns, |r| r.status == TaxReturnStatus::Pending),
        rows: returns
            .into_iter()
            .map(|tax_return| ReturnRow {
                overdue: tax_return.is_overdue(today),
                tax_return,
            })
            .collect(),
        month,
        upcoming,
    };

    Ok(Html(template.render()?))
}
