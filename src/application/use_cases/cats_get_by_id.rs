// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::Value;

use crate::application::dto::cats_request::CatsGetByIdInput;
use crate::application::errors::CatsError;
use crate::domain::models::cats::CatsEntity;
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::repositories::repository::RepositoryOptions;
use crate::utils::validators::validate_schema;

pub struct CatsGetByIdUseCase<R: CatsRepository> {
    repository: Arc<R>,
    partition: String,
}

impl<R: CatsRepository> CatsGetByIdUseCase<R> {
    pub fn new(repository: Arc<R>, partition: impl Into<String>) -> Self {
        Self {
            repository,
            partition: partition.into(),
        }
    }

    pub async fn execute(&self, input: &Value) -> Result<CatsEntity, CatsError> {
        let CatsGetByIdInput { id } = validate_schema(input)?;

        self.repository
            .find_by_id(id, &RepositoryOptions::with_partition(self.partition.as_str()))
            .await?
            .map(CatsEntity::hydrate)
            .ok_or_else(|| CatsError::NotFound("catsNotFound".to_string()))
    }
}
