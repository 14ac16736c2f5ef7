mod config;
mod error;
mod filters;
mod handlers;
mod ingestion;
mod middleware;
mod models;
mod records;
mod session;
mod state;

use axum::{
    extract::DefaultBodyLimit,
    response::Redirect,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_cookies::CookieManagerLayer;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use dotenvy::dotenv;

use config::Config;
use ingestion::SimulatedIngestion;
use state::AppState;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    env_logger::init();

    let config = Config::from_env();
    let addr = config.bind_addr();

    let state = AppState::new(config, Arc::new(SimulatedIngestion));
    let app = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            log::error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };

    log::info!("Aetheris console listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, app).await {
        log::error!("Server error: {}", e);
    }
}

fn create_router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        // Sign-in and password reset
        .route("/", get(|| async { Redirect::permanent("/login") }))
        .route("/login", get(handlers::auth::login_page))
        .route("/login", post(handlers::auth::login))
        .route("/logout", post(handlers::auth::logout))
        .route("/forgot-password", get(handlers::auth::forgot_password_page))
        .route("/forgot-password", post(handlers::auth::forgot_password))
        .route("/otp-verification", get(handlers::auth::otp_page))
        .route("/otp-verification", post(handlers::auth::verify_otp))

        .route("/dashboard", get(handlers::dashboard::dashboard))

        // Invoices
        .route("/invoice", get(handlers::invoice::invoice_index))
        .route("/invoice/generate", get(handlers::invoice::generate_page))
        .route("/invoice/generate", post(handlers::invoice::update_draft))
        .route("/invoice/generate/items", post(handlers::invoice::add_item))
        .route("/invoice/generate/items/:id/delete", post(handlers::invoice::remove_item))
        .route("/invoice/generate/po", post(handlers::invoice::upload_purchase_order))
        .route("/invoice/old", get(handlers::invoice::old_invoices))

        // Orders
        .route("/orders", get(handlers::orders::orders_list))
        .route("/orders/upload", post(handlers::orders::upload_order))

        // Workers
        .route("/works", get(handlers::works::works_list))
        .route("/works", post(handlers::works::create_worker))
        .route("/works/:id", post(handlers::works::update_worker))
        .route("/works/:id/delete", post(handlers::works::delete_worker))

        // Materials
        .route("/materials", get(handlers::materials::materials_list))
        .route("/materials", post(handlers::materials::create_material))

        // Input bills
        .route("/input-bills", get(handlers::input_bills::input_bills_list))
        .route("/input-bills", post(handlers::input_bills::create_manual_bill))
        .route("/input-bills/upload", post(handlers::input_bills::upload_bill))

        .route("/tax-filing", get(handlers::tax_filing::tax_filing))

        // E-way bills
        .route("/eway-bill", get(handlers::eway_bill::eway_bills_list))
        .route("/eway-bill/upload", post(handlers::eway_bill::upload_eway_bill))

        // API routes
        .route("/api/session", get(handlers::api::current_session))
        .route("/api/payroll", get(handlers::api::payroll))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CookieManagerLayer::new())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024)) // 10MB
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use rust_decimal::Decimal;
    use std::time::Duration;
    use tower::ServiceExt;

    use crate::{
        ingestion::testing::FixedIngestion,
        models::BillKind,
        records::{aggregate, filter_by_month_and_search, Month},
    };

    const BOUNDARY: &str = "console-test-boundary";

    fn test_state() -> AppState {
        let config = Config {
            auth_delay: Duration::ZERO,
            ..Config::default()
        };
        AppState::new(config, Arc::new(FixedIngestion))
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn form_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn upload_request(uri: &str, file_name: &str) -> Request<Body> {
        let body = format!(
            "--{b}\r\nContent-Disposition: form-data; name=\"document\"; filename=\"{f}\"\r\nContent-Type: application/octet-stream\r\n\r\nnot really a document\r\n--{b}--\r\n",
            b = BOUNDARY,
            f = file_name,
        );
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn location(response: &Response) -> &str {
        response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }

    fn sets_flash(response: &Response) -> bool {
        response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.starts_with("flash="))
    }

    #[tokio::test]
    async fn root_redirects_to_login() {
        let app = create_router(test_state());
        let response = send(&app, get_request("/")).await;

        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(location(&response), "/login");
    }

    #[tokio::test]
    async fn empty_login_stays_on_login_page() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, form_request("/login", "email=&password=secret")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(body_text(response).await.contains("Please enter your email and password"));
        assert!(!state.session.lock().await.is_authenticated());
    }

    #[tokio::test]
    async fn login_then_logout() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, form_request("/login", "email=a%40b.com&password=x")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/dashboard");

        let dashboard = body_text(send(&app, get_request("/dashboard")).await).await;
        assert!(dashboard.contains("a@b.com"));
        assert!(dashboard.contains("E-Way Bill"));

        let session = body_text(send(&app, get_request("/api/session")).await).await;
        let session: serde_json::Value = serde_json::from_str(&session).unwrap();
        assert_eq!(session["email"], "a@b.com");
        assert_eq!(session["is_authenticated"], true);

        let response = send(&app, form_request("/logout", "")).await;
        assert_eq!(location(&response), "/login");
        assert!(!state.session.lock().await.is_authenticated());
    }

    #[tokio::test]
    async fn password_reset_flow() {
        let app = create_router(test_state());

        let response = send(&app, form_request("/forgot-password", "email=a%40b.com")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/otp-verification?email=a%40b.com");

        let page = body_text(send(&app, get_request("/otp-verification?email=a%40b.com")).await).await;
        assert!(page.contains("We sent a code to a@b.com"));

        let mismatch = form_request(
            "/otp-verification",
            "email=a%40b.com&otp=000000&new_password=one&confirm_password=two",
        );
        assert!(body_text(send(&app, mismatch).await).await.contains("Passwords do not match"));

        let wrong_code = form_request(
            "/otp-verification",
            "email=a%40b.com&otp=000000&new_password=pw&confirm_password=pw",
        );
        assert!(body_text(send(&app, wrong_code).await).await.contains("Invalid OTP. Please try again."));

        let ok = form_request(
            "/otp-verification",
            "email=a%40b.com&otp=123456&new_password=pw&confirm_password=pw",
        );
        let page = body_text(send(&app, ok).await).await;
        assert!(page.contains("Password changed successfully!"));
        assert!(page.contains("url=/login"));
    }

    #[tokio::test]
    async fn materials_search_is_case_insensitive() {
        let app = create_router(test_state());
        let page = body_text(
            send(&app, get_request("/materials?month=2025-01&q=steel&tab=raw")).await,
        )
        .await;

        assert!(page.contains("Steel Sheets"));
        assert!(!page.contains("Copper Wire"));
        assert!(!page.contains("Finished Product A"));
    }

    #[tokio::test]
    async fn empty_month_shows_no_records() {
        let app = create_router(test_state());
        let page = body_text(send(&app, get_request("/orders?month=2023-06")).await).await;

        assert!(page.contains("No orders found"));
        assert!(page.contains("0 order(s) found"));
    }

    #[tokio::test]
    async fn orders_tiles_for_january() {
        let app = create_router(test_state());
        let page = body_text(send(&app, get_request("/orders?month=2025-01")).await).await;

        assert!(page.contains("437,500"));
        assert!(page.contains("109,375"));
        assert!(page.contains("4 order(s) found"));
    }

    #[tokio::test]
    async fn manual_input_bill_updates_totals() {
        let state = test_state();
        let app = create_router(state.clone());
        let month = Month::current();

        let manual_totals = |bills: &[crate::models::InputBill]| {
            let matching: Vec<_> = filter_by_month_and_search(bills, month, "")
                .filter(|b| b.kind == BillKind::Manual)
                .collect();
            let gst: Decimal = aggregate(matching.iter().copied(), |b| b.gst_amount);
            (matching.len(), gst)
        };

        let (count_before, gst_before) = manual_totals(state.input_bills.read().await.all());

        let body = format!("description=Test&gst_amount=500&vendor=Acme&month={}", month);
        let response = send(&app, form_request("/input-bills", &body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(location(&response).contains("tab=manual"));

        let (count_after, gst_after) = manual_totals(state.input_bills.read().await.all());
        assert_eq!(count_after, count_before + 1);
        assert_eq!(gst_after, gst_before + Decimal::from(500));
    }

    #[tokio::test]
    async fn incomplete_manual_bill_is_ignored() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, form_request("/input-bills", "description=Test&gst_amount=0&vendor=Acme")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.input_bills.read().await.len(), 4);
    }

    #[tokio::test]
    async fn input_bill_upload_uses_ingestion() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, upload_request("/input-bills/upload?month=2025-01", "bill_042.PDF")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/input-bills?month=2025-01&tab=upload");
        assert!(sets_flash(&response));

        let store = state.input_bills.read().await;
        assert_eq!(store.len(), 5);
        let bill = &store.all()[4];
        assert_eq!(bill.id, 5);
        assert_eq!(bill.kind, BillKind::Document);
        assert_eq!(bill.gst_amount, Decimal::from(4321));
        assert_eq!(bill.document_name.as_deref(), Some("bill_042.PDF"));
    }

    #[tokio::test]
    async fn unsupported_upload_changes_nothing() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, upload_request("/input-bills/upload", "notes.txt")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert!(sets_flash(&response));
        assert_eq!(state.input_bills.read().await.len(), 4);

        send(&app, upload_request("/eway-bill/upload", "bill.png")).await;
        assert_eq!(state.eway_bills.read().await.len(), 4);
    }

    #[tokio::test]
    async fn eway_bill_upload_appends_active_bill() {
        let state = test_state();
        let app = create_router(state.clone());

        send(&app, upload_request("/eway-bill/upload", "route.pdf")).await;

        let store = state.eway_bills.read().await;
        let bill = &store.all()[store.len() - 1];
        assert_eq!(bill.bill_number, "EWB000000000042");
        assert_eq!(bill.distance, 420);
        assert!(bill.is_active());
    }

    #[tokio::test]
    async fn order_upload_only_acknowledges() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, upload_request("/orders/upload", "po.xlsx")).await;
        assert!(sets_flash(&response));
        assert_eq!(state.orders.read().await.len(), 4);
    }

    #[tokio::test]
    async fn flash_is_shown_once() {
        let app = create_router(test_state());

        let request = Request::builder()
            .uri("/orders")
            .header(header::COOKIE, "flash=success:Order%20document%20received")
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        let cleared = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .any(|v| v.starts_with("flash=") && v.contains("Max-Age=0"));
        assert!(cleared);
        assert!(body_text(response).await.contains("Order document received"));
    }

    #[tokio::test]
    async fn workers_add_edit_delete() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, form_request("/works/1/delete", "month=2025-01")).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), "/works?month=2025-01");
        assert!(state.workers.read().await.get(1).is_none());
        assert_eq!(state.workers.read().await.len(), 4);

        // Already gone: still a redirect, nothing else removed.
        send(&app, form_request("/works/1/delete", "")).await;
        assert_eq!(state.workers.read().await.len(), 4);

        send(&app, form_request("/works", "name=Meena+Rao&weekly_salary=2600&department=Packaging")).await;
        {
            let workers = state.workers.read().await;
            assert_eq!(workers.len(), 5);
            assert_eq!(workers.get(6).map(|w| w.name.as_str()), Some("Meena Rao"));
        }

        send(&app, form_request("/works/6", "name=Meena+Rao&department=Packaging&weekly_salary=2700&status=Inactive")).await;
        {
            let workers = state.workers.read().await;
            let worker = workers.get(6).unwrap();
            assert_eq!(worker.weekly_salary, Decimal::from(2700));
            assert!(!worker.is_active());
        }

        let response = send(&app, form_request("/works/99", "name=Nobody")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn works_page_shows_january_payroll() {
        let app = create_router(test_state());
        let page = body_text(send(&app, get_request("/works?month=2025-01&edit=2")).await).await;

        assert!(page.contains("52,500"));
        assert!(page.contains("12,500"));
        assert!(page.contains("action=\"/works/2\""));

        let payroll = body_text(send(&app, get_request("/api/payroll?month=2025-01")).await).await;
        let payroll: serde_json::Value = serde_json::from_str(&payroll).unwrap();
        assert_eq!(payroll["weeks"], 5);
        assert_eq!(payroll["active_workers"], 4);
        assert_eq!(payroll["monthly_total"], "52500");
    }

    const DECIMAL_MAX: &str = "79228162514264337593543950335";

    #[tokio::test]
    async fn oversized_salary_never_reaches_payroll() {
        let state = test_state();
        let app = create_router(state.clone());

        let body = format!("name=Big+Spender&weekly_salary={}&department=Finance", DECIMAL_MAX);
        let response = send(&app, form_request("/works", &body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(state.workers.read().await.len(), 5);

        let body = format!("weekly_salary={}", DECIMAL_MAX);
        send(&app, form_request("/works/2", &body)).await;
        assert_eq!(
            state.workers.read().await.get(2).map(|w| w.weekly_salary),
            Some(Decimal::from(3000))
        );

        let response = send(&app, get_request("/works?month=2025-01")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let payroll = body_text(send(&app, get_request("/api/payroll?month=2025-01")).await).await;
        let payroll: serde_json::Value = serde_json::from_str(&payroll).unwrap();
        assert_eq!(payroll["monthly_total"], "52500");
    }

    #[tokio::test]
    async fn large_material_quantities_total_on_the_raw_tab() {
        let state = test_state();
        let app = create_router(state.clone());
        let month = Month::current();

        let body = format!("name=Gravel&quantity=4000000000&price=1&tab=raw&month={}", month);
        for _ in 0..2 {
            let response = send(&app, form_request("/materials", &body)).await;
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
        }
        assert_eq!(state.materials.read().await.len(), 7);

        let body = format!("name=Gold&quantity=1&price={}&tab=raw", DECIMAL_MAX);
        send(&app, form_request("/materials", &body)).await;
        assert_eq!(state.materials.read().await.len(), 7);

        let uri = format!("/materials?month={}&tab=raw", month);
        let response = send(&app, get_request(&uri)).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("8,000,000,000"));
    }

    #[tokio::test]
    async fn oversized_manual_gst_is_ignored() {
        let state = test_state();
        let app = create_router(state.clone());

        let body = format!("description=Test&gst_amount={}&vendor=Acme", DECIMAL_MAX);
        send(&app, form_request("/input-bills", &body)).await;
        assert_eq!(state.input_bills.read().await.len(), 4);

        let response = send(&app, get_request("/input-bills?tab=manual")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn oversized_invoice_line_counts_as_zero() {
        let state = test_state();
        let app = create_router(state.clone());

        let body = format!(
            "item_1_description=Bulk&item_1_quantity={}&item_1_rate=2",
            DECIMAL_MAX
        );
        let response = send(&app, form_request("/invoice/generate", &body)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        {
            let draft = state.invoice_draft.lock().await;
            assert_eq!(draft.items[0].description, "Bulk");
            assert_eq!(draft.items[0].quantity, Decimal::ZERO);
            assert_eq!(draft.items[0].amount, Decimal::ZERO);
        }

        let response = send(&app, get_request("/invoice/generate")).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn invoice_lines_add_and_remove() {
        let state = test_state();
        let app = create_router(state.clone());

        send(&app, form_request("/invoice/generate/items", "item_1_description=Bolts&item_1_quantity=10&item_1_rate=25")).await;
        {
            let draft = state.invoice_draft.lock().await;
            assert_eq!(draft.items.len(), 2);
            assert_eq!(draft.items[0].amount, Decimal::from(250));
            assert_eq!(draft.totals().gst, Decimal::from(45));
        }

        send(&app, form_request("/invoice/generate/items/1/delete", "")).await;
        send(&app, form_request("/invoice/generate/items/2/delete", "")).await;
        let draft = state.invoice_draft.lock().await;
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].id, 2);
    }

    #[tokio::test]
    async fn purchase_order_fills_client() {
        let state = test_state();
        let app = create_router(state.clone());

        let response = send(&app, upload_request("/invoice/generate/po", "po.pdf")).await;
        assert_eq!(location(&response), "/invoice/generate");

        let page = body_text(send(&app, get_request("/invoice/generate")).await).await;
        assert!(page.contains("Fixture Client"));
        assert!(page.contains("GSTTEST0001"));
    }

    #[tokio::test]
    async fn tax_filing_includes_annual_returns() {
        let app = create_router(test_state());
        let page = body_text(send(&app, get_request("/tax-filing?month=2025-01")).await).await;

        assert!(page.contains("2024-FY"));
        assert!(page.contains("202,000"));
        assert!(!page.contains("2024-12</td>"));
    }
}
