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
    handlers::{list_url, uploaded_file_name, ListQuery, Shell},
    ingestion::{has_extension, ORDER_EXTENSIONS},
    middleware::{set_flash, FlashKind},
    models::Order,
    records::{aggregate, average, filter_by_month_and_search, Month},
    state::AppState,
};

#[derive(Template)]
#[template(path = "orders.html")]
struct OrdersTemplate {
    shell: Shell,
    month: Month,
    q: String,
    orders: Vec<Order>,
    total_amount: Decimal,
    total_items: u32,
    average_value: Decimal,
}

pub async fn orders_list(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let orders: Vec<Order> = {
        let store = state.orders.read().await;
        filter_by_month_and_search(store.all(), month, query.term())
            .cloned()
            .collect()
    };

    let template = OrdersTemplate {
        shell: Shell::load(&state, &cookies, "Orders Management").await,
        total_amount: aggregate(&orders, |o| o.amount),
        total_items: aggregate(&orders, |o| o.items),
        average_value: average(&orders, |o| o.amount),
        month,
        q: query.q,
        orders,
    };

    Ok(Html(template.render()?))
}

/// Acknowledges an order document. Nothing is added to the list.
pub async fn upload_order(
    cookies: Cookies,
    Query(query): Query<ListQuery>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let back = list_url("/orders", &query.month(), query.term(), "");

    match uploaded_file_name(multipart).await? {
        Some(file_name) if has_extension(&file_name, ORDER_EXTENSIONS) => {
            log::info!("Order document {} received", file_name);
            set_flash(
                &cookies,
                FlashKind::Success,
                format!("Order document \"{}\" uploaded successfully!", file_name),
            );
        }
        Some(file_name) => {
            log::warn!("Rejected order document {}", file_name);
            set_flash(
                &cookies,
                FlashKind::Error,
                "Unsupported file type. Use PDF, DOC, DOCX or XLSX.",
            );
        }
        None => set_flash(&cookies, FlashKind::Error, "Please choose a file to upload."),
    }

    Ok(Redirect::to(&back))
}
