use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sqlx::error::ErrorKind;

#[derive(Debug, PartialEq)]
pub enum CatalogError {
    NotFound(String),
    Conflict(String),
    BadRequest(String),
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    pub fn status(&self) -> StatusCode {
        match self {
            CatalogError::NotFound(_) => StatusCode::NOT_FOUND,
            CatalogError::Conflict(_) | CatalogError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CatalogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            CatalogError::NotFound(message)
            | CatalogError::Conflict(message)
            | CatalogError::BadRequest(message) => message,
            CatalogError::Internal(message) => {
                log::error!("{}", message);
                String::from("Internal server error")
            }
        };
        (status, body).into_response()
    }
}

pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .map(|error| matches!(error.kind(), ErrorKind::ForeignKeyViolation))
        .unwrap_or(false)
}

impl From<sqlx::Error> for CatalogError {
    fn from(error: sqlx::Error) -> Self {
        if let sqlx::Error::RowNotFound = error {
            return CatalogError::NotFound(String::from("Not found"));
        }
        match error.as_database_error().map(|error| error.kind()) {
            Some(ErrorKind::UniqueViolation) => {
                CatalogError::Conflict(String::from("Name already exists"))
            }
            Some(ErrorKind::ForeignKeyViolation) => {
                CatalogError::BadRequest(String::from("Unknown genre or publisher"))
            }
            _ => CatalogError::Internal(format!("Database error: {}", error)),
        }
    }
}

impl From<handlebars::RenderError> for CatalogError {
    fn from(error: handlebars::RenderError) -> Self {
        CatalogError::Internal(format!("Render error: {}", error))
    }
}
