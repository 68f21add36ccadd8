use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, rejection::JsonRejection},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};

use slotcraft_inventory::{AddItem, DropStack, InventoryCommand, MoveStack, SplitStack, SyncInventory};

use crate::app::routes::{body, command_response};
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_inventory).put(sync_inventory))
        .route("/move", post(move_stack))
        .route("/split", post(split_stack))
        .route("/drop", delete(drop_stack))
        .route("/add", post(add_item))
}

pub async fn list_inventory(Extension(services): Extension<Arc<AppServices>>) -> Response {
    match services.inventory().await {
        Ok(slots) => {
            let catalog = services.catalog();
            let inventory = slots
                .into_iter()
                .map(|slot| dto::slot_to_response(catalog, slot))
                .collect();
            Json(dto::InventoryResponse { inventory }).into_response()
        }
        Err(err) => errors::inventory_error_to_response(err),
    }
}

async fn run<T>(services: &AppServices, payload: Result<Json<T>, JsonRejection>) -> Response
where
    T: Into<InventoryCommand>,
{
    match body(payload) {
        Ok(cmd) => command_response(services.dispatch(cmd.into()).await),
        Err(response) => response,
    }
}

pub async fn sync_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<SyncInventory>, JsonRejection>,
) -> Response {
    run(&services, payload).await
}

pub async fn move_stack(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<MoveStack>, JsonRejection>,
) -> Response {
    run(&services, payload).await
}

pub async fn split_stack(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<SplitStack>, JsonRejection>,
) -> Response {
    run(&services, payload).await
}

pub async fn drop_stack(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<DropStack>, JsonRejection>,
) -> Response {
    run(&services, payload).await
}

pub async fn add_item(
    Extension(services): Extension<Arc<AppServices>>,
    payload: Result<Json<AddItem>, JsonRejection>,
) -> Response {
    run(&services, payload).await
}
