use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::Debug;

// Codes 1..=99 are internal faults and map to 500; 100.. are caller faults
// and map to 400 with the message exposed.
#[derive(Debug)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Error {
    pub fn is_internal(&self) -> bool {
        self.code < 100
    }
}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        io_error(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        configuration_error(format!("malformed tariff schedule: {}", err))
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

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn database_error<T: Debug>(_: T) -> Error {
    Error {
        code: 2,
        message: "database error".into(),
    }
}

pub fn reqwest_error(_: reqwest::Error) -> Error {
    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn route_unavailable_error() -> Error {
    Error {
        code: 4,
        message: "routing provider unavailable".into(),
    }
}

pub fn io_error(_: std::io::Error) -> Error {
    Error {
        code: 5,
        message: "io error".into(),
    }
}

// An incomplete or inconsistent tariff schedule. Fatal to the request; the
// engine logs it at error level and never substitutes a default tier.
pub fn configuration_error(message: impl Into<String>) -> Error {
    Error {
        code: 10,
        message: message.into(),
    }
}

pub fn invalid_invocation_error() -> Error {
    Error {
        code: 100,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn validation_error(message: impl Into<String>) -> Error {
    Error {
        code: 102,
        message: message.into(),
    }
}
