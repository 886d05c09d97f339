use std::io;
use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tokio::signal;

mod api_error;
mod config;
mod db;
mod http;
mod middleware;
mod models;
mod service;
mod store;
mod telemetry;

use crate::config::Config;
use crate::db::create_pool;
use crate::http::match_handler::AppState;
use crate::middleware::{cors_middleware, security_headers};
use crate::service::MatchService;
use crate::store::postgres::PgMatchStore;
use crate::store::MatchStore;
use crate::telemetry::init_telemetry;

#[tokio::main]
async fn main() -> io::Result<()> {
    let config = Config::from_env().expect("Failed to load configuration");

    init_telemetry();

    let db_pool = create_pool(&config)
        .await
        .expect("Failed to create database pool");

    let store: Arc<dyn MatchStore> = Arc::new(PgMatchStore::new(db_pool.clone()));
    let match_service = Arc::new(MatchService::new(store));

    tracing::info!(
        "Starting match service on {}:{}",
        config.server.host,
        config.server.port
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(db_pool.clone()))
            .app_data(web::Data::new(AppState {
                match_service: match_service.clone(),
            }))
            .wrap(cors_middleware())
            .wrap(security_headers())
            .wrap(actix_web::middleware::Logger::default())
            .configure(http::match_handler::configure_routes)
            .service(
                web::scope("/api").route("/health", web::get().to(http::health::health_check)),
            )
    })
    .bind((config.server.host.clone(), config.server.port))?
    .run();

    // Graceful shutdown
    let server_handle = server.handle();
    tokio::spawn(async move {
        signal::ctrl_c()
            .await
            .expect("Failed to listen for shutdown signal");
        tracing::info!("Shutdown signal received, stopping server...");
        server_handle.stop(true).await;
    });

    server.await
}
