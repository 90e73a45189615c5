// Route exports
pub mod fit;
pub mod products;

use actix_web::{error, http::StatusCode, middleware, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::SecuritySettings;
use crate::core::PatternSelector;
use crate::models::ErrorResponse;
use crate::services::{
    CacheKey, ProductCache, ProductSnapshot, RateLimiter, StorefrontClient, StorefrontError,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub selector: PatternSelector,
    pub storefront: Option<Arc<StorefrontClient>>,
    pub product_cache: Arc<ProductCache>,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// Storefront product listing, served from cache when fresh
    pub async fn product_snapshot(&self) -> Result<ProductSnapshot, StorefrontError> {
        let storefront = self
            .storefront
            .as_ref()
            .ok_or(StorefrontError::NotConfigured)?;

        let key = CacheKey::products(storefront.store_domain());
        if let Some(snapshot) = self.product_cache.get(&key).await {
            return Ok(snapshot);
        }

        let snapshot: ProductSnapshot = Arc::new(storefront.fetch_all_products().await?);
        self.product_cache.set(&key, snapshot.clone()).await;
        let stats = self.product_cache.stats();
        tracing::info!(
            cached_entries = stats.entries,
            ttl_secs = stats.ttl_secs,
            "Cached {} storefront products for {}",
            snapshot.len(),
            storefront.store_domain()
        );
        Ok(snapshot)
    }

    pub fn store_domain(&self) -> Option<&str> {
        self.storefront.as_deref().map(StorefrontClient::store_domain)
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(fit::configure)
            .configure(products::configure),
    );
}

/// JSON error body with the given status
pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("Query error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(handle_query_payload_error)
}

/// Headers added to every response so the widget can only be framed by
/// the configured storefront
pub fn security_headers(security: &SecuritySettings) -> middleware::DefaultHeaders {
    middleware::DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("Referrer-Policy", "origin-when-cross-origin"))
        .add(("Content-Security-Policy", security.content_security_policy()))
}
