// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::application::dto::cats_request::CatsDeleteInput;
use crate::application::errors::CatsError;
use crate::domain::models::cats::CatsEntity;
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::repositories::repository::{Filter, RepositoryError, RepositoryOptions};
use crate::utils::validators::validate_schema;

/// 删除猫用例（软删除）
///
/// 单次写操作，不开启事务。
pub struct CatsDeleteUseCase<R: CatsRepository> {
    repository: Arc<R>,
    partition: String,
}

impl<R: CatsRepository> CatsDeleteUseCase<R> {
    pub fn new(repository: Arc<R>, partition: impl Into<String>) -> Self {
        Self {
            repository,
            partition: partition.into(),
        }
    }

    pub async fn execute(&self, input: &Value) -> Result<CatsEntity, CatsError> {
        let CatsDeleteInput { id } = validate_schema(input)?;
        let options = RepositoryOptions::with_partition(self.partition.as_str());

        let model = self
            .repository
            .find_by_id(id, &options)
            .await?
            .ok_or_else(|| CatsError::NotFound("catsNotFound".to_string()))?;

        let mut cats = model.hydrate();
        cats.set_delete();

        let patch = serde_json::to_value(&cats).map_err(RepositoryError::from)?;
        let result = self
            .repository
            .update_one(&Filter::by_id(cats.id), &patch, &options, None)
            .await?;
        if result.matched_count == 0 {
            return Err(CatsError::NotFound("catsNotFound".to_string()));
        }

        info!(id = %cats.id, partition = %self.partition, "Cats soft-deleted");
        Ok(cats)
    }
}
