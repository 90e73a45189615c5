// Service exports
pub mod cache;
pub mod products;
pub mod rate_limit;
pub mod storefront;

pub use cache::{CacheKey, CacheStats, ProductCache, ProductSnapshot};
pub use products::{
    build_product_url, color_priority, count_products, group_products_for_pattern, parse_sku,
    Season,
};
pub use rate_limit::{RateLimitDecision, RateLimiter};
pub use storefront::{StorefrontClient, StorefrontError, StorefrontProduct};
