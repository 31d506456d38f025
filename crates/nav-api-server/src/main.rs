use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
    Extension, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing::{info, warn};

use nav_api_server::auth::{middleware::require_auth, JwtManager};
use nav_api_server::config::Settings;
use nav_api_server::database::{schema, seed, DbPool, Repository};
use nav_api_server::handlers;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,nav_api_server=debug".to_string()),
        )
        .with_target(true)
        .init();

    info!("🚀 Starting nav API server...");

    // Load configuration
    let settings = Settings::load()?;
    info!("✅ Configuration loaded");

    // Open the store. Fatal if the file cannot be opened or created.
    let db_pool = DbPool::new(&settings.database).await?;
    info!("✅ Database connection established");

    // Bootstrap: schema first, then the emptiness-gated seeder. Nothing else
    // touches the store until this sequence completes, and the listener is
    // only bound afterwards.
    schema::ensure_schema(&db_pool).await?;
    if seed::needs_seed(&db_pool).await? {
        info!("Empty store detected, seeding default content...");
        let report = seed::seed(&db_pool, &settings.auth).await?;
        for warning in &report.warnings {
            warn!("Seed warning: {}", warning);
        }
    } else {
        info!("Store already populated, seeding skipped");
    }

    let repository = Arc::new(Repository::new(db_pool));
    let jwt_manager = Arc::new(JwtManager::new(
        &settings.auth.jwt_secret,
        settings.auth.token_expiration_seconds,
    ));

    // Build router
    let app = build_router(repository, jwt_manager, settings.clone());

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn build_router(
    repository: Arc<Repository>,
    jwt_manager: Arc<JwtManager>,
    settings: Settings,
) -> Router {
    // Public routes (reads, login, health)
    let public_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/menus", get(handlers::menus::list_menus))
        // Same `{id}` segment as the protected card routes; the merged
        // method routers must agree on the parameter name.
        .route("/api/cards/{id}", get(handlers::cards::get_cards))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/friends", get(handlers::friends::list_friends))
        .route("/api/ads", get(handlers::ads::list_ads));

    // Protected routes (every mutation)
    let protected_routes = Router::new()
        .route("/api/menus", post(handlers::menus::create_menu))
        .route(
            "/api/menus/{id}",
            put(handlers::menus::update_menu).delete(handlers::menus::delete_menu),
        )
        .route("/api/menus/{id}/sub", post(handlers::menus::create_sub_menu))
        .route(
            "/api/sub_menus/{id}",
            put(handlers::menus::update_sub_menu).delete(handlers::menus::delete_sub_menu),
        )
        .route("/api/cards", post(handlers::cards::create_card))
        .route(
            "/api/cards/{id}",
            put(handlers::cards::update_card).delete(handlers::cards::delete_card),
        )
        .route("/api/users/password", post(handlers::auth::change_password))
        .route("/api/friends", post(handlers::friends::create_friend))
        .route(
            "/api/friends/{id}",
            put(handlers::friends::update_friend).delete(handlers::friends::delete_friend),
        )
        .route("/api/ads", post(handlers::ads::create_ad))
        .route(
            "/api/ads/{id}",
            put(handlers::ads::update_ad).delete(handlers::ads::delete_ad),
        )
        .route("/api/upload", post(handlers::upload::upload_logo))
        .layer(middleware::from_fn(require_auth));

    // Static assets: uploaded logos plus the SPA bundle with index fallback
    let spa_index = format!("{}/index.html", settings.server.static_dir);
    let static_service =
        ServeDir::new(&settings.server.static_dir).fallback(ServeFile::new(spa_index));

    let max_body = settings.uploads.max_file_size_mb * 1024 * 1024;

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/uploads", ServeDir::new(&settings.uploads.dir))
        .fallback_service(static_service)
        // Shared state
        .layer(Extension(repository))
        .layer(Extension(jwt_manager))
        .layer(Extension(settings))
        // CORS
        .layer(
            CorsLayer::permissive()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        // Body limit (uploads)
        .layer(DefaultBodyLimit::max(max_body))
}
