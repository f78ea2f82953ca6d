//! Route configuration and setup.
//!
//! Reads are public; every mutation sits behind the admin auth middleware.
//! Feedback is the one inversion: creation is public, listing is protected.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::routing::{delete, get, post, put};
use axum::Router;
use showroom_core::{Config, StorageBackend};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::auth_middleware;
use crate::handlers;
use crate::state::AppState;

// Slack for multipart boundaries and text fields on top of the image budget.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Setup all application routes.
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router, anyhow::Error> {
    let cors = setup_cors(config)?;

    let protected = protected_routes().layer(axum::middleware::from_fn_with_state(
        state.clone(),
        auth_middleware,
    ));

    let body_limit = config.max_file_size_bytes * config.max_images_per_car + FORM_OVERHEAD_BYTES;

    let mut app = public_routes()
        .merge(protected)
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // With local storage the API serves the uploads directory itself.
    if config.storage_backend == StorageBackend::Local {
        app = app.nest_service(
            config.local_storage_base_url.as_str(),
            ServeDir::new(&config.local_storage_path),
        );
    }

    Ok(app)
}

fn public_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/cars", get(handlers::cars::list_cars))
        .route("/api/cars/{id}", get(handlers::cars::get_car))
        .route("/api/cars/{id}/similar", get(handlers::cars::similar_cars))
        .route("/api/makes", get(handlers::makes::list_makes))
        .route("/api/makes/{id}", get(handlers::makes::get_make))
        .route("/api/news", get(handlers::news::list_news))
        .route("/api/news/{id}", get(handlers::news::get_news))
        .route("/api/seasonal-offers", get(handlers::offers::list_offers))
        .route("/api/seasonal-offers/{id}", get(handlers::offers::get_offer))
        .route("/api/partners", get(handlers::partners::list_partners))
        .route("/api/partners/{id}", get(handlers::partners::get_partner))
        .route("/api/faqs", get(handlers::faqs::list_faqs))
        .route("/api/faqs/{id}", get(handlers::faqs::get_faq))
        .route("/api/feedback", post(handlers::feedback::create_feedback))
        .route(
            "/api/home-page-images",
            get(handlers::content::get_home_page_images),
        )
        .route("/api/social", get(handlers::content::get_social))
        .route("/api/terms", get(handlers::content::get_terms))
        .route("/api/what-we-do", get(handlers::content::get_what_we_do))
}

fn protected_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/me", get(handlers::auth::me))
        .route("/api/cars", post(handlers::cars::create_car))
        .route(
            "/api/cars/{id}",
            put(handlers::cars::update_car).delete(handlers::cars::delete_car),
        )
        .route("/api/makes", post(handlers::makes::create_make))
        .route(
            "/api/makes/{id}",
            put(handlers::makes::update_make).delete(handlers::makes::delete_make),
        )
        .route("/api/news", post(handlers::news::create_news))
        .route(
            "/api/news/{id}",
            put(handlers::news::update_news).delete(handlers::news::delete_news),
        )
        .route("/api/seasonal-offers", post(handlers::offers::create_offer))
        .route(
            "/api/seasonal-offers/{id}",
            put(handlers::offers::update_offer).delete(handlers::offers::delete_offer),
        )
        .route("/api/partners", post(handlers::partners::create_partner))
        .route(
            "/api/partners/{id}",
            put(handlers::partners::update_partner).delete(handlers::partners::delete_partner),
        )
        .route("/api/faqs", post(handlers::faqs::create_faq))
        .route(
            "/api/faqs/{id}",
            put(handlers::faqs::update_faq).delete(handlers::faqs::delete_faq),
        )
        .route("/api/feedback", get(handlers::feedback::list_feedback))
        .route(
            "/api/feedback/{id}",
            delete(handlers::feedback::delete_feedback),
        )
        .route(
            "/api/home-page-images",
            put(handlers::content::update_home_page_images),
        )
        .route("/api/social", put(handlers::content::update_social))
        .route("/api/terms", put(handlers::content::update_terms))
        .route("/api/what-we-do", put(handlers::content::update_what_we_do))
}

fn setup_cors(config: &Config) -> Result<CorsLayer, anyhow::Error> {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];

    let cors = if config.cors_origins.is_empty()
        || config.cors_origins.contains(&"*".to_string())
    {
        if config.is_production() {
            tracing::warn!("CORS configured to allow all origins in production");
        }
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .cors_origins
            .iter()
            .map(|o| {
                o.parse()
                    .map_err(|e| anyhow::anyhow!("Invalid CORS origin '{}': {}", o, e))
            })
            .collect::<Result<_, _>>()?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(Any)
    };
    Ok(cors)
}
