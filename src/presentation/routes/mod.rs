// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::trace::TraceLayer;

use crate::config::settings::Settings;
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::services::logger_service::LoggerService;
use crate::presentation::handlers::cats_handler;

/// 创建应用路由
///
/// # 返回值
///
/// 返回未注入依赖的路由，仓库类型由 `R` 决定
pub fn routes<R: CatsRepository + 'static>() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version));

    let cats_routes = Router::new()
        .route(
            "/v1/cats",
            get(cats_handler::list_cats::<R>).post(cats_handler::create_cats::<R>),
        )
        .route(
            "/v1/cats/{id}",
            get(cats_handler::get_cats::<R>)
                .put(cats_handler::update_cats::<R>)
                .delete(cats_handler::delete_cats::<R>),
        );

    Router::new().merge(public_routes).merge(cats_routes)
}

/// 创建完整的应用
///
/// 注入仓库、日志服务和配置，并挂载请求追踪
pub fn app<R: CatsRepository + 'static>(
    repository: Arc<R>,
    logger: Arc<dyn LoggerService>,
    settings: Arc<Settings>,
) -> Router {
    routes::<R>()
        .layer(Extension(repository))
        .layer(Extension(logger))
        .layer(Extension(settings))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
