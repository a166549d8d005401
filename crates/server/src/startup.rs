use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use service::employee::ListingConfig;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", cfg.server.host, cfg.server.port).parse()?)
}

/// Connect, migrate and seed per configuration, then build the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let listing = ListingConfig::try_from(&cfg.employees)?;
    let db = models::db::connect_with_config(&cfg.database).await?;

    if cfg.database.run_migrations {
        models::db::migrate(&db).await?;
        info!("migrations_applied");
    } else {
        warn!("migrations skipped by configuration");
    }
    if cfg.database.seed_demo_data {
        match models::seed::seed_if_empty(&db).await? {
            Some(report) => info!(teams = report.teams, employees = report.employees, "demo_data_seeded"),
            None => info!("demo data present, seeding skipped"),
        }
    }

    Ok(routes::build_router(AppState::new(db, listing), build_cors()))
}

/// Public entry: build the app and run the HTTP server
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    info!(%addr, "starting server crate");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
