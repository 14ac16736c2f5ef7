use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, Redirect},
};
use axum_extra::extract::Multipart;
use askama::Template;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tower_cookies::Cookies;

use crate::{
    error::AppResult,
    filters,
    handlers::{parse_date, parse_field, uploaded_file_name, ListQuery, Shell},
    ingestion::{has_extension, PURCHASE_ORDER_EXTENSIONS},
    middleware::{set_flash, FlashKind},
    models::{within_form_range, Invoice, InvoiceDraft, InvoiceTotals},
    records::{aggregate, filter_by_month_and_search, Month},
    state::AppState,
};

const GENERATE_PATH: &str = "/invoice/generate";

#[derive(Template)]
#[template(path = "invoice/index.html")]
struct InvoiceIndexTemplate {
    shell: Shell,
    recent: Vec<Invoice>,
}

#[derive(Template)]
#[template(path = "invoice/generate.html")]
struct GenerateInvoiceTemplate {
    shell: Shell,
    draft: InvoiceDraft,
    totals: InvoiceTotals,
    due_date: String,
}

#[derive(Template)]
#[template(path = "invoice/old.html")]
struct OldInvoicesTemplate {
    shell: Shell,
    month: Month,
    q: String,
    invoices: Vec<Invoice>,
    total_amount: Decimal,
}

pub async fn invoice_index(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<Html<String>> {
    let mut recent: Vec<Invoice> = state.invoices.read().await.all().to_vec();
    recent.sort_by(|a, b| b.date.cmp(&a.date));
    recent.truncate(2);

    let template = InvoiceIndexTemplate {
        shell: Shell::load(&state, &cookies, "Invoice Management").await,
        recent,
    };
    Ok(Html(template.render()?))
}

pub async fn generate_page(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<Html<String>> {
    let draft = state.invoice_draft.lock().await.clone();

    let template = GenerateInvoiceTemplate {
        shell: Shell::load(&state, &cookies, "Generate New Invoice")
            .await
            .back_to("/invoice"),
        totals: draft.totals(),
        due_date: draft.due_date.map(|d| d.to_string()).unwrap_or_default(),
        draft,
    };
    Ok(Html(template.render()?))
}

/// Save: applies the posted header and line values.
pub async fn update_draft(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    apply_draft_form(&mut *state.invoice_draft.lock().await, &fields);
    Redirect::to(GENERATE_PATH)
}

/// Keeps whatever was typed, then appends an empty line.
pub async fn add_item(
    State(state): State<AppState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let mut draft = state.invoice_draft.lock().await;
    apply_draft_form(&mut draft, &fields);
    let id = draft.add_item();
    log::debug!("Added invoice line {}", id);
    Redirect::to(GENERATE_PATH)
}

pub async fn remove_item(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let mut draft = state.invoice_draft.lock().await;
    apply_draft_form(&mut draft, &fields);
    if !draft.remove_item(id) {
        log::debug!("Invoice line {} kept", id);
    }
    Redirect::to(GENERATE_PATH)
}

pub async fn upload_purchase_order(
    State(state): State<AppState>,
    cookies: Cookies,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let Some(file_name) = uploaded_file_name(multipart).await? else {
        set_flash(&cookies, FlashKind::Error, "Please choose a PO document to upload.");
        return Ok(Redirect::to(GENERATE_PATH));
    };

    if !has_extension(&file_name, PURCHASE_ORDER_EXTENSIONS) {
        set_flash(&cookies, FlashKind::Error, "Only PDF purchase orders are supported.");
        return Ok(Redirect::to(GENERATE_PATH));
    }

    let po = state.ingestion.purchase_order(&file_name);
    state.invoice_draft.lock().await.apply_purchase_order(po);

    log::info!("Purchase order {} applied to invoice draft", file_name);
    set_flash(
        &cookies,
        FlashKind::Success,
        "PO uploaded successfully! Invoice details will be auto-filled.",
    );
    Ok(Redirect::to(GENERATE_PATH))
}

pub async fn old_invoices(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let invoices: Vec<Invoice> = {
        let store = state.invoices.read().await;
        filter_by_month_and_search(store.all(), month, query.term())
            .cloned()
            .collect()
    };

    let template = OldInvoicesTemplate {
        shell: Shell::load(&state, &cookies, "Invoice History")
            .await
            .back_to("/invoice"),
        total_amount: aggregate(&invoices, |i| i.amount),
        month,
        q: query.q,
        invoices,
    };
    Ok(Html(template.render()?))
}

#[derive(Default)]
struct LineInput {
    description: String,
    quantity: Option<Decimal>,
    rate: Option<Decimal>,
}

/// Applies an editor form. Line fields arrive as `item_<id>_<field>`;
/// unparsable or out-of-range numbers count as zero.
fn apply_draft_form(draft: &mut InvoiceDraft, fields: &[(String, String)]) {
    let mut lines: BTreeMap<u32, LineInput> = BTreeMap::new();

    for (key, value) in fields {
        match key.as_str() {
            "invoice_number" => draft.invoice_number = value.trim().to_string(),
            "date" => {
                if let Some(date) = parse_date(Some(value.as_str())) {
                    draft.date = date;
                }
            }
            "due_date" => draft.due_date = parse_date(Some(value.as_str())),
            "client_name" => draft.client_name = value.trim().to_string(),
            "client_address" => draft.client_address = value.trim().to_string(),
            "client_gst" => draft.client_gst = value.trim().to_string(),
            other => {
                let Some((id, field)) = parse_line_key(other) else {
                    continue;
                };
                let line = lines.entry(id).or_default();
                match field {
                    "description" => line.description = value.clone(),
                    "quantity" => line.quantity = parse_line_number(value),
                    "rate" => line.rate = parse_line_number(value),
                    _ => {}
                }
            }
        }
    }

    for (id, line) in lines {
        draft.update_item(
            id,
            line.description,
            line.quantity.unwrap_or_default(),
            line.rate.unwrap_or_default(),
        );
    }
}

fn parse_line_number(value: &str) -> Option<Decimal> {
    parse_field::<Decimal>(Some(value)).filter(|v| within_form_range(*v))
}

fn parse_line_key(key: &str) -> Option<(u32, &str)> {
    let rest = key.strip_prefix("item_")?;
    let (id, field) = rest.split_once('_')?;
    Some((id.parse().ok()?, field))
}
