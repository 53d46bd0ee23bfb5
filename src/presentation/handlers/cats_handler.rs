// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{Map, Value};

use crate::application::use_cases::cats_create::CatsCreateUseCase;
use crate::application::use_cases::cats_delete::CatsDeleteUseCase;
use crate::application::use_cases::cats_get_by_id::CatsGetByIdUseCase;
use crate::application::use_cases::cats_list::CatsListUseCase;
use crate::application::use_cases::cats_update::CatsUpdateUseCase;
use crate::config::settings::Settings;
use crate::domain::models::cats::CatsEntity;
use crate::domain::models::repository::{CreatedModel, PaginatedResult};
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::services::logger_service::LoggerService;
use crate::presentation::errors::AppError;

/// 创建猫
pub async fn create_cats<R: CatsRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Extension(logger): Extension<Arc<dyn LoggerService>>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<CreatedModel>), AppError> {
    let use_case = CatsCreateUseCase::new(repo, logger);
    let created = use_case.execute(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// 分页列出猫
///
/// 查询参数：`page`、`limit`、`sort=field:asc|desc`、`search=field:value`，
/// 后两者可以重复出现。
pub async fn list_cats<R: CatsRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Extension(settings): Extension<Arc<Settings>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<PaginatedResult<CatsEntity>>, AppError> {
    let use_case = CatsListUseCase::new(repo, settings.database.partition.as_str());
    let page = use_case.execute(&list_input(params)).await?;
    Ok(Json(page))
}

/// 根据ID获取猫
pub async fn get_cats<R: CatsRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Extension(settings): Extension<Arc<Settings>>,
    Path(id): Path<String>,
) -> Result<Json<CatsEntity>, AppError> {
    let use_case = CatsGetByIdUseCase::new(repo, settings.database.partition.as_str());
    let cats = use_case.execute(&id_input(id)).await?;
    Ok(Json(cats))
}

/// 更新猫
pub async fn update_cats<R: CatsRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Extension(logger): Extension<Arc<dyn LoggerService>>,
    Extension(settings): Extension<Arc<Settings>>,
    Path(id): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<CatsEntity>, AppError> {
    let input = match payload {
        Value::Object(mut fields) => {
            fields.insert("id".to_string(), Value::String(id));
            Value::Object(fields)
        }
        other => other,
    };

    let use_case = CatsUpdateUseCase::new(repo, logger, settings.database.partition.as_str());
    let cats = use_case.execute(&input).await?;
    Ok(Json(cats))
}

/// 软删除猫
pub async fn delete_cats<R: CatsRepository + 'static>(
    Extension(repo): Extension<Arc<R>>,
    Extension(settings): Extension<Arc<Settings>>,
    Path(id): Path<String>,
) -> Result<Json<CatsEntity>, AppError> {
    let use_case = CatsDeleteUseCase::new(repo, settings.database.partition.as_str());
    let cats = use_case.execute(&id_input(id)).await?;
    Ok(Json(cats))
}

fn id_input(id: String) -> Value {
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::String(id));
    Value::Object(fields)
}

/// 将查询参数转换为列表用例的输入
fn list_input(params: Vec<(String, String)>) -> Value {
    let mut input = Map::new();
    let mut sort = Map::new();
    let mut search = Map::new();

    for (key, value) in params {
        match key.as_str() {
            name @ ("page" | "limit") => {
                let parsed = value
                    .parse::<u64>()
                    .map(Value::from)
                    .unwrap_or(Value::String(value));
                input.insert(name.to_string(), parsed);
            }
            "sort" => {
                let (field, order) = value.split_once(':').unwrap_or((value.as_str(), "asc"));
                sort.insert(field.to_string(), Value::String(order.to_lowercase()));
            }
            "search" => match value.split_once(':') {
                Some((field, text)) => {
                    search.insert(field.to_string(), Value::String(text.to_string()));
                }
                None => {
                    search.insert(value, Value::Null);
                }
            },
            _ => {}
        }
    }

    if !sort.is_empty() {
        input.insert("sort".to_string(), Value::Object(sort));
    }
    if !search.is_empty() {
        input.insert("search".to_string(), Value::Object(search));
    }
    Value::Object(input)
}
