use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Multipart;
use askama::Template;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    error::AppResult,
    filters,
    handlers::{list_url, parse_date, parse_field, today, uploaded_file_name, ListQuery, Shell},
    ingestion::{has_extension, INPUT_BILL_EXTENSIONS},
    middleware::{set_flash, FlashKind},
    models::{BillKind, InputBill, ManualBillDraft},
    records::{aggregate, filter_by_month_and_search, Month},
    state::AppState,
};

#[derive(Template)]
#[template(path = "input_bills.html")]
struct InputBillsTemplate {
    shell: Shell,
    month: Month,
    q: String,
    kind: BillKind,
    bills: Vec<InputBill>,
    total_gst: Decimal,
    today: String,
}

#[derive(Deserialize)]
pub struct ManualBillForm {
    description: Option<String>,
    gst_amount: Option<String>,
    vendor: Option<String>,
    date: Option<String>,
    #[serde(default)]
    month: String,
    #[serde(default)]
    q: String,
}

pub async fn input_bills_list(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let kind = BillKind::from_tab(&query.tab);

    let bills: Vec<InputBill> = {
        let store = state.input_bills.read().await;
        filter_by_month_and_search(store.all(), month, query.term())
            .filter(|b| b.kind == kind)
            .cloned()
            .collect()
    };

    let template = InputBillsTemplate {
        shell: Shell::load(&state, &cookies, "Input Bills & GST").await,
        total_gst: aggregate(&bills, |b| b.gst_amount),
        today: today().to_string(),
        month,
        q: query.q,
        kind,
        bills,
    };

    Ok(Html(template.render()?))
}

pub async fn create_manual_bill(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<ManualBillForm>,
) -> Redirect {
    let draft = ManualBillDraft {
        gst_amount: parse_field(form.gst_amount.as_deref()),
        date: parse_date(form.date.as_deref()),
        description: form.description.unwrap_or_default(),
        vendor: form.vendor.unwrap_or_default(),
    };

    if let Some(bill) = draft.build(today()) {
        let id = state.input_bills.write().await.insert(bill);
        log::info!("Added manual input bill {}", id);
        set_flash(&cookies, FlashKind::Success, "Manual entry added");
    }

    let query = ListQuery {
        month: form.month,
        q: form.q,
        ..Default::default()
    };
    Redirect::to(&list_url(
        "/input-bills",
        &query.month(),
        query.term(),
        BillKind::Manual.tab(),
    ))
}

/// Records an uploaded bill with the amounts ingestion reports for it.
pub async fn upload_bill(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let back = list_url(
        "/input-bills",
        &query.month(),
        query.term(),
        BillKind::Document.tab(),
    );

    let Some(file_name) = uploaded_file_name(multipart).await? else {
        set_flash(&cookies, FlashKind::Error, "Please choose a file to upload.");
        return Ok(Redirect::to(&back));
    };

    if !has_extension(&file_name, INPUT_BILL_EXTENSIONS) {
        log::warn!("Rejected input bill document {}", file_name);
        set_flash(
            &cookies,
            FlashKind::Error,
            "Unsupported file type. Use PDF, JPG, JPEG or PNG.",
        );
        return Ok(Redirect::to(&back));
    }

    let extracted = state.ingestion.input_bill(&file_name, today());
    let gst_amount = extracted.gst_amount;
    let id = state.input_bills.write().await.insert(InputBill::from(extracted));

    log::info!("Input bill {} created from {}", id, file_name);
    set_flash(
        &cookies,
        FlashKind::Success,
        format!(
            "Document \"{}\" uploaded successfully! GST amount auto-detected: ₹{}",
            file_name, gst_amount
        ),
    );
    Ok(Redirect::to(&back))
}
