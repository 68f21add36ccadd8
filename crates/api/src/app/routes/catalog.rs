use std::sync::Arc;

use axum::{Json, extract::Extension};

use crate::app::dto::{ItemResponse, ItemsResponse, RecipeResponse, RecipesResponse};
use crate::app::services::AppServices;

pub async fn list_items(Extension(services): Extension<Arc<AppServices>>) -> Json<ItemsResponse> {
    Json(ItemsResponse {
        items: services
            .catalog()
            .items()
            .into_iter()
            .map(ItemResponse::from)
            .collect(),
    })
}

pub async fn list_recipes(
    Extension(services): Extension<Arc<AppServices>>,
) -> Json<RecipesResponse> {
    Json(RecipesResponse {
        recipes: services
            .catalog()
            .recipes()
            .into_iter()
            .map(RecipeResponse::from)
            .collect(),
    })
}
