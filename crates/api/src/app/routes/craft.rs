use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    response::Response,
    routing::post,
};

use slotcraft_inventory::Craft;

use crate::app::routes::{body, command_response};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/", post(craft))
}

pub async fn craft(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<Craft>, JsonRejection>,
) -> Response {
    let cmd = match body(payload) {
        Ok(cmd) => cmd,
        Err(response) => return response,
    };
    command_response(services.dispatch(cmd.into()).await)
}
