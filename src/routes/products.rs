use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use super::{error_response, AppState};
use crate::models::{ProductType, ProductsByPatternQuery, ProductsByPatternResponse, ProductsByType};
use crate::services::{count_products, group_products_for_pattern, Season, StorefrontError};

/// Configure product lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/products/by-pattern", web::get().to(products_by_pattern));
}

/// Purchasable variants for one pattern
///
/// GET /api/v1/products/by-pattern?patternCode=VS-XS&productType=TW
async fn products_by_pattern(
    state: web::Data<AppState>,
    query: web::Query<ProductsByPatternQuery>,
) -> impl Responder {
    let pattern_code = query.pattern_code.trim().to_uppercase();
    if !matches!(pattern_code.split_once('-'), Some((breed, size)) if !breed.is_empty() && !size.is_empty())
    {
        return error_response(
            StatusCode::BAD_REQUEST,
            "invalid_pattern_code",
            "Invalid pattern code format. Expected: BREED-SIZE (e.g., VS-XS)",
        );
    }

    let product_type = match query.product_type.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(code) => match ProductType::from_code(&code.to_uppercase()) {
            Some(product_type) => Some(product_type),
            None => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    "invalid_product_type",
                    format!(
                        "Unknown product type {}; expected one of {}",
                        code,
                        ProductType::all()
                            .iter()
                            .map(ProductType::code)
                            .collect::<Vec<_>>()
                            .join(", ")
                    ),
                );
            }
        },
    };

    let snapshot = match state.product_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(StorefrontError::NotConfigured) => {
            return error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "storefront_unavailable",
                "Product lookup is not configured",
            );
        }
        Err(e) => {
            tracing::error!("Failed to fetch products for {}: {}", pattern_code, e);
            return error_response(StatusCode::BAD_GATEWAY, "storefront_error", e.to_string());
        }
    };

    let mut products = group_products_for_pattern(
        &snapshot,
        &pattern_code,
        state.store_domain().unwrap_or_default(),
        Season::current(),
        None,
    );

    if let Some(wanted) = product_type {
        let selected = products.remove(&wanted).unwrap_or_default();
        products = ProductsByType::from([(wanted, selected)]);
    }

    let total = count_products(&products);
    tracing::debug!("Found {} products for pattern {}", total, pattern_code);

    HttpResponse::Ok().json(ProductsByPatternResponse {
        pattern_code,
        product_type: product_type.map(|t| t.code().to_string()),
        products,
        total,
    })
}
