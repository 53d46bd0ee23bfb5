// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use catsrs::config::settings::{DatabaseBackend, Settings};
use catsrs::domain::services::logger_service::LoggerService;
use catsrs::infrastructure::database::{connection, mongo};
use catsrs::infrastructure::repositories::cats_mongo_repo_impl::CatsMongoRepository;
use catsrs::infrastructure::repositories::cats_repo_impl::CatsRepositoryImpl;
use catsrs::infrastructure::services::tracing_logger_impl::TracingLogger;
use catsrs::presentation::routes;
use catsrs::utils::telemetry;
use migration::{Migrator, MigratorTrait};
use tokio::net::TcpListener;
use tracing::info;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting catsrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!(backend = ?settings.database.backend, "Configuration loaded");

    let logger: Arc<dyn LoggerService> = Arc::new(TracingLogger::default());

    // 3. Connect to the configured store and build the app
    let app = match settings.database.backend {
        DatabaseBackend::Postgres => {
            let db = Arc::new(connection::create_pool(&settings.database).await?);
            info!("Database connection established");

            info!("Running database migrations...");
            Migrator::up(db.as_ref(), None).await?;
            info!("Database migrations applied");

            let repository = Arc::new(CatsRepositoryImpl::new(
                db,
                Some(settings.database.partition.clone()),
            ));
            repository.ensure_partition().await?;

            routes::app(repository, logger, settings.clone())
        }
        DatabaseBackend::Mongo => {
            let client = mongo::connect(&settings.mongo).await?;
            let repository = Arc::new(CatsMongoRepository::for_cats(
                client,
                &settings.mongo.database,
            ));

            routes::app(repository, logger, settings.clone())
        }
    };

    // 4. Start HTTP server
    let addr = settings.server.address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
