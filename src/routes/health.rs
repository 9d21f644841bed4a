use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;
use serde_json::json;

use crate::store::StoreHealth;

/// Liveness and store reachability
///
/// ## Responses:
/// - `200 OK`: `{ "status": "ok", "store": "up", "timestamp" }`.
/// - `503 Service Unavailable`: the store did not answer; `status` is
///   `"degraded"` and `store` is `"down"`. The failure itself is only logged.
#[get("/health")]
pub async fn health(store: web::Data<dyn StoreHealth>) -> impl Responder {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "store": "up",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            log::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "store": "down",
                "timestamp": Utc::now()
            }))
        }
    }
}
