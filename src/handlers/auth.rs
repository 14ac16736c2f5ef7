use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use askama::Template;
use serde::Deserialize;

use crate::{error::AppResult, state::AppState};

/// The code the password-reset screen accepts.
const DEMO_OTP: &str = "123456";

#[derive(Template)]
#[template(path = "login.html")]
struct LoginTemplate {
    error: String,
    email: String,
}

#[derive(Template)]
#[template(path = "forgot_password.html")]
struct ForgotPasswordTemplate {}

#[derive(Template)]
#[template(path = "otp_verification.html")]
struct OtpTemplate {
    email: String,
    error: String,
    success: String,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordForm {
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
pub struct OtpQuery {
    #[serde(default)]
    email: String,
}

#[derive(Deserialize)]
pub struct OtpForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    otp: String,
    #[serde(default)]
    new_password: String,
    #[serde(default)]
    confirm_password: String,
}

pub async fn login_page() -> AppResult<Html<String>> {
    let template = LoginTemplate {
        error: String::new(),
        email: String::new(),
    };
    Ok(Html(template.render()?))
}

pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> AppResult<Response> {
    let email = form.email.trim();
    let logged_in = state.session.lock().await.login(email, &form.password);

    if logged_in {
        log::info!("Logged in as {}", email);
        return Ok(Redirect::to("/dashboard").into_response());
    }

    let template = LoginTemplate {
        error: "Please enter your email and password".to_string(),
        email: email.to_string(),
    };
    Ok((StatusCode::UNAUTHORIZED, Html(template.render()?)).into_response())
}

pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.session.lock().await.logout();
    log::info!("Logged out");
    Redirect::to("/login")
}

pub async fn forgot_password_page() -> AppResult<Html<String>> {
    Ok(Html(ForgotPasswordTemplate {}.render()?))
}

/// Pretends to send a code, then moves on to OTP entry.
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<ForgotPasswordForm>,
) -> Redirect {
    tokio::time::sleep(state.config.auth_delay).await;

    let email = form.email.trim();
    log::debug!("OTP requested for {}", email);
    Redirect::to(&format!(
        "/otp-verification?email={}",
        urlencoding::encode(email)
    ))
}

pub async fn otp_page(Query(query): Query<OtpQuery>) -> AppResult<Html<String>> {
    let template = OtpTemplate {
        email: query.email,
        error: String::new(),
        success: String::new(),
    };
    Ok(Html(template.render()?))
}

pub async fn verify_otp(Form(form): Form<OtpForm>) -> AppResult<Html<String>> {
    let mut template = OtpTemplate {
        email: form.email,
        error: String::new(),
        success: String::new(),
    };

    match check_reset(&form.otp, &form.new_password, &form.confirm_password) {
        Ok(()) => template.success = "Password changed successfully!".to_string(),
        Err(message) => template.error = message.to_string(),
    }

    Ok(Html(template.render()?))
}

/// Password confirmation is checked before the code.
fn check_reset(otp: &str, new_password: &str, confirm_password: &str) -> Result<(), &'static str> {
    if new_password != confirm_password {
        return Err("Passwords do not match");
    }
    if otp.trim() != DEMO_OTP {
        return Err("Invalid OTP. Please try again.");
    }
    Ok(())
}
