use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self.code {
            1..=99 => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status().is_client_error()
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        database_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        deserialization_error(err)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = if self.is_client_error() {
            self.message.as_str()
        } else {
            tracing::error!(code = self.code, error = %self.message, "request failed");
            "Internal Server Error"
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn bad_request_error(message: impl Into<String>) -> Error {
    Error {
        code: 100,
        message: message.into(),
    }
}

pub fn not_found_error(address: &str) -> Error {
    Error {
        code: 101,
        message: format!(
            "Unrecognized address '{}'. Check spelling or be more specific.",
            address
        ),
    }
}

pub fn env_var_error(err: env::VarError) -> Error {
    Error {
        code: 1,
        message: format!("environment variable error: {}", err),
    }
}

pub fn config_error(detail: impl Into<String>) -> Error {
    Error {
        code: 1,
        message: detail.into(),
    }
}

pub fn database_error<T: Debug>(err: T) -> Error {
    Error {
        code: 2,
        message: format!("database error: {:?}", err),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: format!("reqwest error: {}", err),
    }
}

pub fn upstream_error(detail: impl Into<String>) -> Error {
    Error {
        code: 4,
        message: detail.into(),
    }
}

pub fn unexpected_error(detail: impl Into<String>) -> Error {
    Error {
        code: 5,
        message: detail.into(),
    }
}

pub fn deserialization_error<T: Display>(err: T) -> Error {
    Error {
        code: 6,
        message: format!("deserialization error: {}", err),
    }
}
