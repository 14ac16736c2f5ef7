use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, Redirect},
};
use askama::Template;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    error::{AppError, AppResult},
    filters,
    handlers::{list_url, non_empty, parse_date, parse_field, today, ListQuery, Shell},
    middleware::{set_flash, FlashKind},
    models::{worker::monthly_payroll, Worker, WorkerDraft, WorkerPatch},
    records::{count_where, Month, RecordId},
    state::AppState,
};

pub struct WorkerRow {
    pub worker: Worker,
    pub monthly_pay: Decimal,
    pub editing: bool,
}

#[derive(Template)]
#[template(path = "works.html")]
struct WorksTemplate {
    shell: Shell,
    month: Month,
    rows: Vec<WorkerRow>,
    active_count: usize,
    weeks: u32,
    monthly_total: Decimal,
    today: String,
}

#[derive(Deserialize)]
pub struct EditQuery {
    edit: Option<String>,
}

// HTML forms send every input as text; empty ones are treated as missing.
#[derive(Deserialize)]
pub struct WorkerForm {
    name: Option<String>,
    weekly_salary: Option<String>,
    department: Option<String>,
    join_date: Option<String>,
    #[serde(default)]
    month: String,
}

#[derive(Deserialize)]
pub struct WorkerEditForm {
    name: Option<String>,
    department: Option<String>,
    weekly_salary: Option<String>,
    status: Option<String>,
    #[serde(default)]
    month: String,
}

#[derive(Deserialize)]
pub struct MonthForm {
    #[serde(default)]
    month: String,
}

pub async fn works_list(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
    Query(edit): Query<EditQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let workers: Vec<Worker> = state.workers.read().await.all().to_vec();
    let editing: Option<RecordId> = parse_field(edit.edit.as_deref());

    let template = WorksTemplate {
        shell: Shell::load(&state, &cookies, "Workers Management").await,
        active_count: count_where(&workers, Worker::is_active),
        weeks: month.weeks(),
        monthly_total: monthly_payroll(&workers, &month),
        rows: workers
            .into_iter()
            .map(|worker| WorkerRow {
                monthly_pay: worker.monthly_pay(&month),
                editing: editing == Some(worker.id),
                worker,
            })
            .collect(),
        month,
        today: today().to_string(),
    };

    Ok(Html(template.render()?))
}

pub async fn create_worker(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<WorkerForm>,
) -> Redirect {
    let back = works_url(&form.month);
    let draft = WorkerDraft {
        weekly_salary: parse_field(form.weekly_salary.as_deref()),
        join_date: parse_date(form.join_date.as_deref()),
        name: form.name.unwrap_or_default(),
        department: form.department.unwrap_or_default(),
    };

    match draft.build(today()) {
        Some(worker) => {
            let name = worker.name.clone();
            let id = state.workers.write().await.insert(worker);
            log::info!("Added worker {} ({})", id, name);
            set_flash(&cookies, FlashKind::Success, format!("{} added", name));
        }
        None => log::debug!("Worker form incomplete, nothing added"),
    }

    Redirect::to(&back)
}

pub async fn update_worker(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<WorkerEditForm>,
) -> AppResult<Redirect> {
    let patch = WorkerPatch {
        weekly_salary: parse_field(form.weekly_salary.as_deref()),
        status: parse_field(form.status.as_deref()),
        name: non_empty(form.name),
        department: non_empty(form.department),
    };

    state
        .workers
        .write()
        .await
        .update(id, |worker| patch.apply(worker))
        .ok_or_else(|| AppError::NotFound(format!("Worker {}", id)))?;

    log::info!("Updated worker {}", id);
    Ok(Redirect::to(&works_url(&form.month)))
}

/// Deleting an id that is already gone is not an error.
pub async fn delete_worker(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Form(form): Form<MonthForm>,
) -> Redirect {
    match state.workers.write().await.remove(id) {
        Some(worker) => log::info!("Deleted worker {} ({})", id, worker.name),
        None => log::debug!("Worker {} already deleted", id),
    }
    Redirect::to(&works_url(&form.month))
}

fn works_url(month: &str) -> String {
    let query = ListQuery {
        month: month.to_string(),
        ..Default::default()
    };
    list_url("/works", &query.month(), "", "")
}
