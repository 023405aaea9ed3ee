use actix_web::{get, web, HttpResponse};
use chrono::Utc;
use serde_json::json;

use crate::store::Store;

/// Health check endpoint
///
/// Reports whether the database answers. Responds 503 when it does not.
#[get("/health")]
pub async fn health(store: web::Data<Store>) -> HttpResponse {
    match store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({
            "status": "ok",
            "database": "ok",
            "timestamp": Utc::now()
        })),
        Err(e) => {
            log::warn!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "status": "degraded",
                "database": "unreachable",
                "timestamp": Utc::now()
            }))
        }
    }
}
