use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
};
use askama::Template;
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    error::AppResult,
    filters,
    handlers::{list_url, parse_date, parse_field, today, ListQuery, Shell},
    middleware::{set_flash, FlashKind},
    models::{material::UNITS, Material, MaterialDraft, MaterialKind},
    records::{aggregate, filter_by_month_and_search, Month},
    state::AppState,
};

#[derive(Template)]
#[template(path = "materials.html")]
struct MaterialsTemplate {
    shell: Shell,
    month: Month,
    q: String,
    kind: MaterialKind,
    materials: Vec<Material>,
    total_quantity: u64,
    total_value: Decimal,
    units: &'static [&'static str],
    today: String,
}

#[derive(Deserialize)]
pub struct MaterialForm {
    name: Option<String>,
    quantity: Option<String>,
    unit: Option<String>,
    price: Option<String>,
    supplier: Option<String>,
    date: Option<String>,
    #[serde(default)]
    tab: String,
    #[serde(default)]
    month: String,
    #[serde(default)]
    q: String,
}

pub async fn materials_list(
    State(state): State<AppState>,
    cookies: Cookies,
    Query(query): Query<ListQuery>,
) -> AppResult<Html<String>> {
    let month = query.month();
    let kind = MaterialKind::from_tab(&query.tab);

    let materials: Vec<Material> = {
        let store = state.materials.read().await;
        filter_by_month_and_search(store.all(), month, query.term())
            .filter(|m| m.kind == kind)
            .cloned()
            .collect()
    };

    let template = MaterialsTemplate {
        shell: Shell::load(&state, &cookies, "Materials Management").await,
        total_quantity: aggregate(&materials, Material::total_quantity),
        total_value: aggregate(&materials, |m| m.price),
        units: &UNITS,
        today: today().to_string(),
        month,
        q: query.q,
        kind,
        materials,
    };

    Ok(Html(template.render()?))
}

/// Adds a material to the tab the form was posted from.
pub async fn create_material(
    State(state): State<AppState>,
    cookies: Cookies,
    Form(form): Form<MaterialForm>,
) -> Redirect {
    let kind = MaterialKind::from_tab(&form.tab);
    let draft = MaterialDraft {
        quantity: parse_field(form.quantity.as_deref()),
        price: parse_field(form.price.as_deref()),
        date: parse_date(form.date.as_deref()),
        name: form.name.unwrap_or_default(),
        unit: form.unit.unwrap_or_default(),
        supplier: form.supplier.unwrap_or_default(),
    };

    if let Some(material) = draft.build(kind, today()) {
        let name = material.name.clone();
        let id = state.materials.write().await.insert(material);
        log::info!("Added {} material {} ({})", kind.as_str(), id, name);
        set_flash(&cookies, FlashKind::Success, format!("{} added", name));
    }

    let query = ListQuery {
        month: form.month,
        q: form.q,
        tab: kind.tab().to_string(),
    };
    Redirect::to(&list_url("/materials", &query.month(), query.term(), &query.tab))
}
