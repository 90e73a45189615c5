use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use fit_finder::catalog::Catalog;
use fit_finder::config::{SecuritySettings, Settings};
use fit_finder::core::PatternSelector;
use fit_finder::routes::{self, AppState};
use fit_finder::services::{ProductCache, RateLimiter, StorefrontClient};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(level: &str, format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

fn build_cors(security: &SecuritySettings) -> Cors {
    if security.allowed_origins.is_empty() {
        return Cors::permissive();
    }

    security
        .allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}

fn build_storefront(settings: &Settings) -> Option<Arc<StorefrontClient>> {
    let storefront = &settings.storefront;
    let (Some(domain), Some(token)) = (&storefront.store_domain, &storefront.access_token) else {
        warn!("Storefront credentials not set, product lookup disabled");
        return None;
    };

    match StorefrontClient::new(
        domain,
        token.clone(),
        &storefront.api_version,
        storefront.page_size,
        Duration::from_secs(storefront.timeout_secs),
    ) {
        Ok(client) => {
            info!("Storefront client initialized for {}", client.store_domain());
            Some(Arc::new(client))
        }
        Err(e) => {
            error!("Failed to initialize storefront client ({}), product lookup disabled", e);
            None
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    // FIT_FINDER_CONFIG points at a single settings file instead of config/
    let settings = match std::env::var("FIT_FINDER_CONFIG") {
        Ok(path) => Settings::load_from(path),
        Err(_) => Settings::load(),
    }
    .map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;

    init_logging(&settings.logging.level, &settings.logging.format);
    info!("Starting Fit Finder service...");

    let catalog = match &settings.catalog.path {
        Some(path) => Catalog::load_from(path),
        None => Catalog::embedded(),
    }
    .map_err(|e| {
        error!("Failed to load pattern catalog: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e.to_string())
    })?;

    info!("Pattern catalog loaded ({} patterns)", catalog.len());

    let weights = settings.scoring_weights();
    let selector = PatternSelector::new(weights, settings.scoring.result_limit);
    info!(
        "Selector initialized with weights: {:?}, limit: {}",
        selector.weights(),
        selector.limit()
    );

    let product_cache = Arc::new(ProductCache::new(
        settings.cache.capacity,
        settings.cache.ttl_secs,
    ));
    let rate_limiter = Arc::new(RateLimiter::new(
        settings.rate_limit.max_requests,
        Duration::from_secs(settings.rate_limit.window_secs),
    ));

    let app_state = AppState {
        catalog: Arc::new(catalog),
        selector,
        storefront: build_storefront(&settings),
        product_cache,
        rate_limiter,
    };

    // Configure HTTP server
    let host = settings.server.host.clone();
    let port = settings.server.port;
    let workers = settings.server.workers.unwrap_or(4);
    let security = settings.security.clone();

    info!("Starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .app_data(routes::json_config())
            .app_data(routes::query_config())
            .wrap(routes::security_headers(&security))
            .wrap(build_cors(&security))
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
