use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
    routing::get,
};

use slotcraft_core::InventoryResult;
use slotcraft_infra::Committed;

use crate::app::{dto, errors};

pub mod catalog;
pub mod craft;
pub mod inventory;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .nest("/inventory", inventory::router())
        .nest("/craft", craft::router())
        .route("/items", get(catalog::list_items))
        .route("/recipes", get(catalog::list_recipes))
}

/// Unwrap a JSON body or turn the rejection into a 400 response.
pub(crate) fn body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, Response> {
    body.map(|Json(value)| value)
        .map_err(errors::rejection_to_response)
}

/// Acknowledge a committed command, or map its failure.
pub(crate) fn command_response(result: InventoryResult<Committed>) -> Response {
    match result {
        Ok(committed) => Json(dto::ActionResponse::ok(committed.outcome.message())).into_response(),
        Err(err) => errors::inventory_error_to_response(err),
    }
}
