//! Request handlers for the calculator routes.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::BytesRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;

use crate::server::AppState;

const INDEX_HTML: &str = include_str!("../templates/index.html");
const HISTORY_HTML: &str = include_str!("../templates/history.html");
const CALCULATOR_JS: &str = include_str!("../static/js/calculator.js");
const STYLE_CSS: &str = include_str!("../static/css/style.css");

/// Body of a successful `/calculate` response.
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    /// The expression exactly as it was sent.
    pub expression: Value,
    /// The formatted result or error message.
    pub result: String,
}

/// Body of a rejected `/calculate` request.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    let body = Json(ErrorResponse {
        error: message.into(),
    });
    (status, body).into_response()
}

/// The calculator page, served at `/` and its aliases.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// The history page. History is kept by the browser; the page is static.
pub async fn history() -> Html<&'static str> {
    Html(HISTORY_HTML)
}

pub async fn health() -> &'static str {
    "OK"
}

pub async fn calculator_js() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        CALCULATOR_JS,
    )
}

pub async fn style_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}

/// Name of the JSON value's type as the error messages spell it.
fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Values treated as "no expression": null, false, zero and empty containers.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            let mime = mime.trim();
            mime.eq_ignore_ascii_case("application/json")
                || (mime.starts_with("application/") && mime.ends_with("+json"))
        })
}

/// `POST /calculate`: evaluates `{"expression": "..."}`.
pub async fn calculate(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    if !is_json(&headers) {
        tracing::warn!("Rejected calculation request without a JSON content type");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "415 Unsupported Media Type: Did not attempt to load JSON data because the \
             request Content-Type was not 'application/json'.",
        );
    }

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Failed to read request body");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, rejection.body_text());
        }
    };

    let payload: Value = match serde_json::from_slice(&body) {
        Ok(payload) => payload,
        Err(err) => {
            tracing::warn!(error = %err, "Rejected malformed JSON body");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("400 Bad Request: Failed to decode JSON object: {}", err),
            );
        }
    };

    let mut fields = match payload {
        Value::Object(fields) => fields,
        other => {
            let message = format!("'{}' object has no attribute 'get'", type_name(&other));
            tracing::warn!(%message, "Rejected non-object JSON body");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, message);
        }
    };

    let expression = fields.remove("expression").unwrap_or(Value::Null);
    if is_blank(&expression) {
        tracing::warn!("Rejected calculation request without an expression");
        return error_response(StatusCode::BAD_REQUEST, "No expression provided");
    }

    let result = match &expression {
        Value::String(text) => state.calculator.evaluate(text),
        other => {
            tracing::debug!(kind = type_name(other), "Expression is not a string");
            format!("Error: '{}' object has no attribute 'replace'", type_name(other))
        }
    };

    Json(CalculateResponse { expression, result }).into_response()
}
