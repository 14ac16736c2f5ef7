use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Multipart;
use askama::Template;
use rust_decimal::Decimal;
use tower_cookies::Cookies;

use crate::{
    error::AppResult,
    filters,
    handlers::{list_url, today, uploaded_file_name, ListQuery, Shell},
    ingestion::{has_extension, EWAY_BILL_EXTENSIONS},
    middleware::{set_flash, FlashKind},
    models::EWayBill,
    records::{aggregate, average, count_where, filter_by_month_and_search, Month},
    state::AppState,
};

#[derive(Template)]
#[template(path = "eway_bill.html")]
struct EWayBillTemplate {
    shell: Shell,
    month: Month,
    q: String,
    bills: Vec<EWayBill>,
    active_count: usize,
    total_distance: u32,
    total_amount: Decimal,
    average_distance: Decimal,
}

pub async fn eway_bills_list(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let bills: Vec<EWayBill> = {
        let store = state.eway_bills.read().await;
        filter_by_month_and_search(store.all(), month, query.term())
            .cloned()
            .collect()
    };

    let template = EWayBillTemplate {
        shell: Shell::load(&state, &cookies, "E-Way Bill Management").await,
        active_count: count_where(&bills, EWayBill::is_active),
        total_distance: aggregate(&bills, |b| b.distance),
        total_amount: aggregate(&bills, |b| b.amount),
        average_distance: average(&bills, |b| Decimal::from(b.distance)),
        month,
        q: query.q,
        bills,
    };

    Ok(Html(template.render()?))
}

pub async fn upload_eway_bill(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let back = list_url("/eway-bill", &query.month(), query.term(), "");

    let Some(file_name) = uploaded_file_name(multipart).await? else {
        set_flash(&cookies, FlashKind::Error, "Please choose a file to upload.");
        return Ok(Redirect::to(&back));
    };

    if !has_extension(&file_name, EWAY_BILL_EXTENSIONS) {
        log::warn!("Rejected e-way bill document {}", file_name);
        set_flash(&cookies, FlashKind::Error, "Only PDF E-Way Bills are supported.");
        return Ok(Redirect::to(&back));
    }

    let bill = EWayBill::from(state.ingestion.eway_bill(&file_name, today()));
    let bill_number = bill.bill_number.clone();
    let id = state.eway_bills.write().await.insert(bill);

    log::info!("E-way bill {} ({}) created from {}", id, bill_number, file_name);
    set_flash(
        &cookies,
        FlashKind::Success,
        format!(
            "E-Way Bill \"{}\" uploaded successfully! Bill number: {}",
            file_name, bill_number
        ),
    );
    Ok(Redirect::to(&back))
}
