use std::{net::SocketAddr, sync::Arc};

use dotenvy::dotenv;
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::AppConfig;
use models::catalog::OPTION_KINDS;
use models::id::{self, IdStrategy};
use service::option::repo::seaorm::SeaOrmOptionRepository;
use service::option::repository::OptionRepository;
use service::option::{OptionService, ServicePolicy};

use crate::errors::StartupError;
use crate::routes;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))
}

/// One service per catalogue kind over the shared connection. Sequential
/// kinds continue numbering after the highest id already stored.
pub async fn build_services(
    db: &DatabaseConnection,
    policy: ServicePolicy,
) -> anyhow::Result<Vec<Arc<OptionService<SeaOrmOptionRepository>>>> {
    let mut services = Vec::with_capacity(OPTION_KINDS.len());
    for kind in OPTION_KINDS {
        let repo = Arc::new(SeaOrmOptionRepository::new(db.clone(), kind.table()));
        let last = match kind.id_strategy {
            IdStrategy::Sequential => {
                let existing = repo.find_all().await?;
                id::max_numeric(existing.iter().map(|r| &r.id))
            }
            IdStrategy::Uuid => 0,
        };
        let ids = id::generator_for(kind.id_strategy, last);
        services.push(Arc::new(OptionService::new(repo, ids, kind, policy)));
    }
    Ok(services)
}

/// Load configuration from file/env and serve.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    let cfg = AppConfig::load_or_env()?;
    common::utils::logging::init_logging(&cfg.log.format);
    run_with(cfg).await
}

/// Connect, migrate when configured, build the router and serve until the
/// listener fails.
pub async fn run_with(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.options.run_migrations {
        migration::Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("migrations applied");
    }

    let policy = ServicePolicy { reject_batch_duplicates: cfg.options.reject_batch_duplicates };
    let services = build_services(&db, policy).await?;
    let app = routes::build_router(services, build_cors());

    let addr = bind_addr(&cfg)?;
    info!(%addr, kinds = OPTION_KINDS.len(), "starting option registry");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
