use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

/// Failures an operation can surface to the caller.
///
/// An empty history is not an error: views report it as an empty state.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database unreachable, misconfigured, or pool exhausted.
    #[error("database connection failed: {0}")]
    Connection(String),

    /// Malformed SQL or constraint violation.
    #[error("database query failed: {0}")]
    Query(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("module `{0}` is not implemented yet")]
    NotImplemented(String),

    #[error("chart rendering failed: {0}")]
    Render(String),

    #[error("spreadsheet encoding failed: {0}")]
    Spreadsheet(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Configuration(_)
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => AppError::Connection(err.to_string()),
            // SQLSTATE 28000: access denied for user
            sqlx::Error::Database(ref db_err)
                if matches!(db_err.code().as_deref(), Some("28000")) =>
            {
                AppError::Connection(err.to_string())
            }
            _ => AppError::Query(err.to_string()),
        }
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

impl From<calamine::XlsxError> for AppError {
    fn from(err: calamine::XlsxError) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            AppError::Query(_) | AppError::Render(_) | AppError::Spreadsheet(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let message = if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
            tracing::error!(error = %self, "Request failed");
            match self {
                AppError::Connection(_) => "Database unavailable, try again later".to_string(),
                _ => "Something went wrong, Contact with system admin".to_string(),
            }
        } else {
            self.to_string()
        };

        HttpResponse::build(status).json(json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_timeout_is_a_connection_error() {
        let err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, AppError::Connection(_)));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn missing_row_is_a_query_error() {
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Query(_)));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn client_errors_keep_their_message() {
        let err = AppError::Validation("score must be between 0 and 100".into());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "score must be between 0 and 100");

        let err = AppError::NotImplemented("payments".into());
        assert_eq!(err.status_code(), StatusCode::NOT_IMPLEMENTED);
        assert!(err.to_string().contains("payments"));
    }
}
