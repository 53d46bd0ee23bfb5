// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::{json, Value};
use tracing::debug;

use crate::application::dto::cats_request::CatsCreateInput;
use crate::application::errors::CatsError;
use crate::domain::models::cats::CatsEntity;
use crate::domain::models::repository::CreatedModel;
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::repositories::repository::TransactionSession;
use crate::domain::services::logger_service::LoggerService;
use crate::utils::validators::validate_schema;

/// 创建猫用例
///
/// 校验输入 → 开启事务 → 创建 → 提交；创建失败时回滚并原样返回错误。
/// 事务在 `execute` 返回前一定已经提交或回滚。
pub struct CatsCreateUseCase<R: CatsRepository> {
    repository: Arc<R>,
    logger: Arc<dyn LoggerService>,
}

impl<R: CatsRepository> CatsCreateUseCase<R> {
    pub fn new(repository: Arc<R>, logger: Arc<dyn LoggerService>) -> Self {
        Self { repository, logger }
    }

    pub async fn execute(&self, input: &Value) -> Result<CreatedModel, CatsError> {
        let input: CatsCreateInput = validate_schema(input)?;
        let entity = CatsEntity::new(input.name, input.breed, input.age);

        let mut session = self.repository.start_session().await?;
        debug!(id = %entity.id, "Session started for cats create");

        let created = self.repository.create(&entity, Some(&mut session)).await;
        match created {
            Ok(cats) => {
                session.commit().await?;
                self.logger
                    .info("cats created successfully.", json!({ "cats": cats }));
                Ok(cats)
            }
            Err(error) => {
                if let Err(rollback_error) = session.rollback().await {
                    self.logger.error(
                        "cats create rollback failed.",
                        json!({ "error": rollback_error.to_string() }),
                    );
                }
                Err(error.into())
            }
        }
    }
}
