use std::sync::Arc;

use reqwest::StatusCode;
use serde_json::{Value, json};

use slotcraft_api::app::{build_app, services::AppServices};

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    /// Same router as prod, in-memory backend with starter data, ephemeral port.
    async fn spawn() -> Self {
        let services = Arc::new(AppServices::in_memory().expect("starter data is valid"));
        let app = build_app(services);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn inventory(&self) -> Vec<(i64, i64, i64)> {
        let res = self.client.get(self.url("/api/inventory")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = res.json().await.unwrap();
        body["inventory"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| {
                (
                    s["slotIndex"].as_i64().unwrap(),
                    s["itemId"].as_i64().unwrap(),
                    s["quantity"].as_i64().unwrap(),
                )
            })
            .collect()
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .post(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }

    async fn delete(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self
            .client
            .delete(self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

const WOOD: i64 = 1;
const STONE: i64 = 2;
const IRON_ORE: i64 = 3;
const WOODEN_PLANKS: i64 = 4;

#[tokio::test]
async fn health_and_request_id() {
    let server = TestServer::spawn().await;

    let res = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("x-request-id"));
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "in_memory");
}

#[tokio::test]
async fn lists_starter_inventory_and_catalog() {
    let server = TestServer::spawn().await;

    assert_eq!(
        server.inventory().await,
        vec![(0, WOOD, 15), (1, STONE, 8), (2, IRON_ORE, 3)]
    );

    let res = server.client.get(server.url("/api/inventory")).send().await.unwrap();
    let body: Value = res.json().await.unwrap();
    assert!(body.is_object());
    assert_eq!(body["inventory"][0]["item"]["name"], "Wood");
    assert_eq!(body["inventory"][0]["item"]["maxStackSize"], 64);

    let items: Value = server
        .client
        .get(server.url("/api/items"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(items["items"].as_array().unwrap().len(), 8);
    assert_eq!(items["items"][0]["name"], "Wood");

    let recipes: Value = server
        .client
        .get(server.url("/api/recipes"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(recipes["recipes"].as_array().unwrap().len(), 5);
    assert_eq!(
        recipes["recipes"][3]["ingredients"].as_array().unwrap().len(),
        2
    );
}

#[tokio::test]
async fn move_swaps_and_validates_slots() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post("/api/inventory/move", json!({"fromSlot": 0, "toSlot": 1}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Moved successfully"}));
    assert_eq!(
        server.inventory().await,
        vec![(0, STONE, 8), (1, WOOD, 15), (2, IRON_ORE, 3)]
    );

    let (status, body) = server
        .post("/api/inventory/move", json!({"fromSlot": 5, "toSlot": 1}))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");

    let (status, body) = server
        .post("/api/inventory/move", json!({"fromSlot": 1, "toSlot": 1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn split_then_drop() {
    let server = TestServer::spawn().await;

    let (status, _) = server
        .post(
            "/api/inventory/split",
            json!({"fromSlot": 0, "toSlot": 10, "amount": 5}),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        server.inventory().await,
        vec![(0, WOOD, 10), (1, STONE, 8), (2, IRON_ORE, 3), (10, WOOD, 5)]
    );

    let (status, body) = server
        .post(
            "/api/inventory/split",
            json!({"fromSlot": 0, "toSlot": 1, "amount": 1}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "item_mismatch");

    let (status, body) = server
        .delete("/api/inventory/drop", json!({"slotIndex": 10, "amount": 2}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Dropped successfully");

    let (status, _) = server
        .delete("/api/inventory/drop", json!({"slotIndex": 2}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        server.inventory().await,
        vec![(0, WOOD, 10), (1, STONE, 8), (10, WOOD, 3)]
    );
}

#[tokio::test]
async fn craft_success_and_shortfall_report() {
    let server = TestServer::spawn().await;

    let (status, body) = server.post("/api/craft", json!({"recipeId": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Crafted 4x Wooden Planks");
    assert_eq!(
        server.inventory().await,
        vec![(0, WOOD, 14), (1, STONE, 8), (2, IRON_ORE, 3), (3, WOODEN_PLANKS, 4)]
    );

    // Iron Sword needs 2 iron ingots and a stick; neither is held.
    let (status, body) = server.post("/api/craft", json!({"recipeId": 5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "insufficient_ingredients");
    assert_eq!(body["shortfalls"].as_array().unwrap().len(), 2);
    assert_eq!(body["shortfalls"][0]["required"], 2);
    assert_eq!(body["shortfalls"][0]["available"], 0);
    assert_eq!(body["shortfalls"][0]["missing"], 2);

    let (status, _) = server.post("/api/craft", json!({"recipeId": 99})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_until_full_is_atomic() {
    let server = TestServer::spawn().await;

    let (status, _) = server
        .post("/api/inventory/add", json!({"itemId": STONE, "amount": 56}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(server.inventory().await[1], (1, STONE, 64));

    // 33 free slots hold at most 33 * 64 stone.
    let before = server.inventory().await;
    let (status, body) = server
        .post("/api/inventory/add", json!({"itemId": STONE, "amount": 33 * 64 + 1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "inventory_full");
    assert_eq!(server.inventory().await, before);

    let (status, body) = server
        .post("/api/inventory/add", json!({"itemId": STONE, "amount": -3}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");
}

#[tokio::test]
async fn sync_replaces_inventory() {
    let server = TestServer::spawn().await;

    let res = server
        .client
        .put(server.url("/api/inventory"))
        .json(&json!({"inventory": [
            {"slotIndex": 7, "itemId": WOODEN_PLANKS, "quantity": 12},
            {"slotIndex": 0, "itemId": WOOD, "quantity": 1}
        ]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        server.inventory().await,
        vec![(0, WOOD, 1), (7, WOODEN_PLANKS, 12)]
    );

    let res = server
        .client
        .put(server.url("/api/inventory"))
        .json(&json!({"slots": [{"slotIndex": 0, "itemId": 7, "quantity": 2}]}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        server.inventory().await,
        vec![(0, WOOD, 1), (7, WOODEN_PLANKS, 12)]
    );
}

#[tokio::test]
async fn malformed_bodies_are_invalid_requests() {
    let server = TestServer::spawn().await;

    let (status, body) = server
        .post("/api/inventory/move", json!({"fromSlot": "zero", "toSlot": 1}))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_request");

    let res = server
        .client
        .post(server.url("/api/craft"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_request");
}
