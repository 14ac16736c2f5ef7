pub mod api;
pub mod auth;
pub mod dashboard;
pub mod eway_bill;
pub mod input_bills;
pub mod invoice;
pub mod materials;
pub mod orders;
pub mod tax_filing;
pub mod works;

use axum_extra::extract::Multipart;
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use tower_cookies::Cookies;

use crate::{
    error::AppResult,
    middleware::{get_current_user, take_flash, CurrentUser, Flash},
    records::Month,
    state::AppState,
};

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Header and menu data every console page renders.
pub struct Shell {
    pub title: &'static str,
    pub back: &'static str,
    pub current_user: CurrentUser,
    pub support_email: String,
    pub flash: Option<Flash>,
}

impl Shell {
    pub async fn load(state: &AppState, cookies: &Cookies, title: &'static str) -> Self {
        Self {
            title,
            back: "/dashboard",
            current_user: get_current_user(state).await,
            support_email: state.config.support_email.clone(),
            flash: take_flash(cookies),
        }
    }

    pub fn back_to(mut self, back: &'static str) -> Self {
        self.back = back;
        self
    }
}

/// `?month=YYYY-MM&q=...&tab=...` as sent by the list screens.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub tab: String,
}

impl ListQuery {
    /// Selected month; missing or malformed values mean the current month.
    pub fn month(&self) -> Month {
        self.month.parse().unwrap_or_else(|_| Month::current())
    }

    pub fn term(&self) -> &str {
        self.q.trim()
    }
}

/// Rebuilds a list URL so redirects keep the user's filters.
pub fn list_url(path: &str, month: &Month, q: &str, tab: &str) -> String {
    let mut url = format!("{}?month={}", path, month);
    if !q.is_empty() {
        url.push_str("&q=");
        url.push_str(&urlencoding::encode(q));
    }
    if !tab.is_empty() {
        url.push_str("&tab=");
        url.push_str(&urlencoding::encode(tab));
    }
    url
}

/// Name of the file sent in the `document` field. The contents are never
/// read.
pub(crate) async fn uploaded_file_name(mut multipart: Multipart) -> AppResult<Option<String>> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("document") {
            continue;
        }
        let file_name = field
            .file_name()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        return Ok(file_name);
    }
    Ok(None)
}

/// Empty form values count as missing.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn parse_field<T: std::str::FromStr>(value: Option<&str>) -> Option<T> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse().ok())
}

pub(crate) fn parse_date(value: Option<&str>) -> Option<NaiveDate> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .and_then(|v| NaiveDate::parse_from_str(v, "%Y-%m-%d").ok())
}
