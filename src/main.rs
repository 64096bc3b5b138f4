use axum::extract::State;
use axum::{http::Method, response::Json, routing::get, Router};
use mongodb::bson::doc;
use serde_json::{json, Value};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod database;
mod errors;
mod handlers;
mod models;
mod routes;
mod services;
mod state;

use config::AppConfig;
use services::file_store::FileStore;
use state::AppState;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let config = AppConfig::from_env();
    tracing::info!(
        "starting with upload dir {:?}, port {}",
        config.upload_dir,
        config.port
    );

    let files = FileStore::new(&config.upload_dir);
    if let Err(e) = files.ensure_dir().await {
        tracing::error!("failed to create upload dir {:?}: {}", config.upload_dir, e);
        std::process::exit(1);
    }

    let db = match database::connection::connect(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("invalid database URL: {}", e);
            std::process::exit(1);
        }
    };

    let app = build_router(AppState::new(db, files));
    start_server(app, config.port).await;
}

fn build_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .nest("/posts", routes::posts::routes())
        .nest("/uploads", routes::uploads::routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn start_server(app: Router, port: u16) {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);

    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("server error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            tracing::error!("failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    }
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let db_status = match state.db.run_command(doc! { "ping": 1 }).await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    Json(json!({
        "status": "healthy",
        "database": db_status,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
