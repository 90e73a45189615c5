use actix_web::{http::StatusCode, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use super::{error_response, AppState};
use crate::core::available_breeds;
use crate::models::{
    FindFitRequest, FindFitResponse, FitResult, FitResultView, HealthResponse, MeasurementInput,
    PatternListResponse, PatternSummary, ProductsByType, TailType,
};
use crate::services::{group_products_for_pattern, ProductSnapshot, RateLimitDecision, Season};

/// Configure fit-finder routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/fit/find", web::post().to(find_fit))
        .route("/patterns", web::get().to(list_patterns))
        .route("/breeds", web::get().to(list_breeds))
        .route("/tail-types", web::get().to(list_tail_types));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        catalog_size: state.catalog.len(),
        timestamp: chrono::Utc::now(),
    })
}

/// Client address for rate limiting
///
/// First `X-Forwarded-For` hop, then `X-Real-IP`, then the peer address.
pub fn client_ip(req: &HttpRequest) -> String {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.split(',').next().unwrap_or("").trim().to_string())
            .filter(|value| !value.is_empty())
    };

    header("x-forwarded-for")
        .or_else(|| header("x-real-ip"))
        .or_else(|| req.peer_addr().map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Find fitting patterns endpoint
///
/// POST /api/v1/fit/find
///
/// Request body:
/// ```json
/// {
///   "breed": "Vizsla",
///   "neckCircumference": 13.0,
///   "chestCircumference": 26.0,
///   "backLength": 19.5,
///   "tailType": "straight",
///   "chondrodystrophic": false,
///   "includeProducts": true
/// }
/// ```
async fn find_fit(
    state: web::Data<AppState>,
    req: web::Json<FindFitRequest>,
    http_req: HttpRequest,
) -> impl Responder {
    let client = client_ip(&http_req);
    if let RateLimitDecision::Limited { retry_after } = state.rate_limiter.check(&client).await {
        let mut response = error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "Too many requests. Please try again later.",
        );
        if let Ok(value) = retry_after.as_secs().max(1).to_string().parse() {
            response
                .headers_mut()
                .insert(actix_web::http::header::RETRY_AFTER, value);
        }
        return response;
    }

    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for find_fit request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let measurements = req.to_measurements();
    let selection = state
        .selector
        .find_patterns(&measurements, state.catalog.patterns());

    let mut best_fit = to_views(&selection.categorized.best_fit);
    let mut good_fit = to_views(&selection.categorized.good_fit);
    let mut might_fit = to_views(&selection.categorized.might_fit);

    let using_storefront = req.include_products && state.storefront.is_some();
    if using_storefront {
        let snapshot = match state.product_snapshot().await {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                tracing::warn!("Product lookup failed, returning fits without products: {}", e);
                None
            }
        };

        let store_domain = state.store_domain().unwrap_or_default();
        let season = Season::current();
        for view in best_fit.iter_mut().chain(good_fit.iter_mut()).chain(might_fit.iter_mut()) {
            view.products = Some(products_for(
                snapshot.as_ref(),
                &view.pattern.code,
                store_domain,
                season,
                &measurements,
            ));
        }
    }

    HttpResponse::Ok().json(FindFitResponse {
        request_id: uuid::Uuid::new_v4().to_string(),
        best_fit,
        good_fit,
        might_fit,
        total_patterns: selection.categorized.total(),
        breed_code: selection.breed_code.map(str::to_string),
        using_storefront,
        timestamp: chrono::Utc::now(),
    })
}

fn to_views(results: &[FitResult<'_>]) -> Vec<FitResultView> {
    results.iter().map(FitResultView::from).collect()
}

fn products_for(
    snapshot: Option<&ProductSnapshot>,
    pattern_code: &str,
    store_domain: &str,
    season: Season,
    measurements: &MeasurementInput,
) -> ProductsByType {
    match snapshot {
        Some(products) => group_products_for_pattern(
            products,
            pattern_code,
            store_domain,
            season,
            Some(measurements),
        ),
        None => ProductsByType::new(),
    }
}

/// Catalog listing without measurement envelopes
async fn list_patterns(state: web::Data<AppState>) -> impl Responder {
    let patterns: Vec<PatternSummary> = state
        .catalog
        .patterns()
        .iter()
        .map(PatternSummary::from)
        .collect();

    HttpResponse::Ok().json(PatternListResponse {
        total: patterns.len(),
        patterns,
    })
}

async fn list_breeds() -> impl Responder {
    HttpResponse::Ok().json(available_breeds())
}

async fn list_tail_types() -> impl Responder {
    HttpResponse::Ok().json(TailType::all())
}
