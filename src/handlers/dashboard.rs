use axum::{extract::State, response::Html};
use askama::Template;
use tower_cookies::Cookies;

use crate::{error::AppResult, handlers::Shell, state::AppState};

pub struct Module {
    pub title: &'static str,
    pub path: &'static str,
    pub color: &'static str,
    pub description: &'static str,
}

pub const MODULES: [Module; 7] = [
    Module {
        title: "Invoice",
        path: "/invoice",
        color: "bg-blue-600",
        description: "Generate and manage invoices",
    },
    Module {
        title: "Orders",
        path: "/orders",
        color: "bg-green-600",
        description: "Track and manage orders",
    },
    Module {
        title: "Works",
        path: "/works",
        color: "bg-purple-600",
        description: "Manage workers and salaries",
    },
    Module {
        title: "Materials",
        path: "/materials",
        color: "bg-orange-600",
        description: "Raw and dispatch materials",
    },
    Module {
        title: "Input Bills",
        path: "/input-bills",
        color: "bg-red-600",
        description: "Upload documents and GST",
    },
    Module {
        title: "Tax Filing",
        path: "/tax-filing",
        color: "bg-indigo-600",
        description: "Manage tax filings",
    },
    Module {
        title: "E-Way Bill",
        path: "/eway-bill",
        color: "bg-teal-600",
        description: "Upload and manage E-Way Bills",
    },
];

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    shell: Shell,
    modules: &'static [Module],
}

pub async fn dashboard(
    State(state): State<AppState>,
    cookies: Cookies,
) -> AppResult<Html<String>> {
    let template = DashboardTemplate {
        shell: Shell::load(&state, &cookies, "Dashboard").await,
        modules: &MODULES,
    };

    Ok(Html(template.render()?))
}
