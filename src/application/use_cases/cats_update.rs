// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::application::dto::cats_request::CatsUpdateInput;
use crate::application::errors::CatsError;
use crate::domain::models::cats::CatsEntity;
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::repositories::repository::{
    Filter, RepositoryError, RepositoryOptions, TransactionSession,
};
use crate::domain::services::logger_service::LoggerService;
use crate::utils::validators::validate_schema;

/// 更新猫用例
///
/// 与创建用例相同的事务语义：失败时回滚并返回原始错误。
pub struct CatsUpdateUseCase<R: CatsRepository> {
    repository: Arc<R>,
    logger: Arc<dyn LoggerService>,
    partition: String,
}

impl<R: CatsRepository> CatsUpdateUseCase<R> {
    pub fn new(
        repository: Arc<R>,
        logger: Arc<dyn LoggerService>,
        partition: impl Into<String>,
    ) -> Self {
        Self {
            repository,
            logger,
            partition: partition.into(),
        }
    }

    pub async fn execute(&self, input: &Value) -> Result<CatsEntity, CatsError> {
        let input: CatsUpdateInput = validate_schema(input)?;
        let options = RepositoryOptions::with_partition(self.partition.as_str());

        let mut cats = self
            .repository
            .find_by_id(input.id, &options)
            .await?
            .map(CatsEntity::hydrate)
            .ok_or_else(|| CatsError::NotFound("catsNotFound".to_string()))?;

        if let Some(name) = input.name {
            cats.name = name;
        }
        if let Some(breed) = input.breed {
            cats.breed = breed;
        }
        if let Some(age) = input.age {
            cats.age = age;
        }
        cats.touch();

        let patch = serde_json::to_value(&cats).map_err(RepositoryError::from)?;

        let mut session = self.repository.start_session().await?;
        let updated = self
            .repository
            .update_one(&Filter::by_id(cats.id), &patch, &options, Some(&mut session))
            .await;

        let error = match updated {
            Ok(result) if result.matched_count > 0 => {
                session.commit().await?;
                self.logger
                    .info("cats updated successfully.", json!({ "cats": cats }));
                return Ok(cats);
            }
            // Deleted between lookup and write
            Ok(_) => CatsError::NotFound("catsNotFound".to_string()),
            Err(error) => error.into(),
        };

        if let Err(rollback_error) = session.rollback().await {
            self.logger.error(
                "cats update rollback failed.",
                json!({ "error": rollback_error.to_string() }),
            );
        }
        Err(error)
    }
}
