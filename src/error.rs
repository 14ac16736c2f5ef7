use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::multipart::MultipartError;
use thiserror::Error;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    status: StatusCode,
    message: String,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Upload error: {0}")]
    Multipart(#[from] MultipartError),

    #[error("{0} not found")]
    NotFound(String),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Template(e) => {
                log::error!("Template error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong while rendering this page.".to_string(),
                )
            }
            AppError::Multipart(e) => {
                log::warn!("Upload rejected: {}", e);
                (StatusCode::BAD_REQUEST, "The upload could not be read.".to_string())
            }
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
        };

        match (ErrorTemplate { status, message: message.clone() }).render() {
            Ok(page) => (status, Html(page)).into_response(),
            Err(e) => {
                log::error!("Error page failed to render: {:?}", e);
                (status, message).into_response()
            }
        }
    }
}
