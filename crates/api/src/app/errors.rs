use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use slotcraft_core::{FailureKind, InventoryError};

pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::StorageFault => StatusCode::INTERNAL_SERVER_ERROR,
        FailureKind::InvalidRequest
        | FailureKind::InsufficientQuantity
        | FailureKind::InsufficientIngredients
        | FailureKind::ItemMismatch
        | FailureKind::StackOverflow
        | FailureKind::InventoryFull => StatusCode::BAD_REQUEST,
    }
}

pub fn inventory_error_to_response(err: InventoryError) -> axum::response::Response {
    let kind = err.kind();
    let status = status_for(kind);

    if let InventoryError::InsufficientIngredients(shortfalls) = &err {
        let shortfalls: Vec<_> = shortfalls
            .iter()
            .map(|s| {
                json!({
                    "itemId": s.item_id.get(),
                    "required": s.required,
                    "available": s.available,
                    "missing": s.missing(),
                })
            })
            .collect();
        return (
            status,
            axum::Json(json!({
                "error": kind.as_str(),
                "message": err.detail(),
                "shortfalls": shortfalls,
            })),
        )
            .into_response();
    }

    if kind == FailureKind::StorageFault {
        // Details stay in the logs.
        return json_error(status, kind.as_str(), "internal storage error");
    }
    json_error(status, kind.as_str(), err.detail())
}

/// Malformed or mistyped request bodies are `invalid_request`, not axum's 415/422.
pub fn rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        FailureKind::InvalidRequest.as_str(),
        rejection.body_text(),
    )
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
