use axum::{
    extract::{Query, State},
    response::Json,
};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    handlers::ListQuery,
    middleware::{get_current_user, CurrentUser},
    models::worker::monthly_payroll,
    records::{count_where, Month},
    state::AppState,
};

#[derive(Serialize)]
pub struct PayrollResponse {
    pub month: String,
    pub weeks: u32,
    pub active_workers: usize,
    pub monthly_total: Decimal,
}

pub async fn current_session(State(state): State<AppState>) -> Json<CurrentUser> {
    Json(get_current_user(&state).await)
}

/// Salary bill for `?month=YYYY-MM`, the numbers the Works tiles show.
pub async fn payroll(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<PayrollResponse> {
    let month: Month = query.month();
    let workers = state.workers.read().await;

    Json(PayrollResponse {
        month: month.to_string(),
        weeks: month.weeks(),
        active_workers: count_where(workers.all(), |w| w.is_active()),
        monthly_total: monthly_payroll(workers.all(), &month),
    })
}
