// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;

use super::repository::{PaginateQuery, Repository, RepositoryError};
use crate::domain::models::cats::CatsEntity;
use crate::domain::models::repository::PaginatedResult;

/// 允许排序的字段
pub const CATS_SORT_FIELDS: &[&str] = &["createdAt", "name", "breed", "age"];

/// 猫仓库特质
///
/// 在通用仓库能力之上增加分页查询
#[async_trait]
pub trait CatsRepository: Repository<CatsEntity> {
    /// 分页查询未删除的记录
    async fn paginate(
        &self,
        query: &PaginateQuery,
    ) -> Result<PaginatedResult<CatsEntity>, RepositoryError>;
}
