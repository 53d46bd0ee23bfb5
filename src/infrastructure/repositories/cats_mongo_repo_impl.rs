// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use mongodb::Client;

use super::mongo_repository::MongoRepository;
use crate::domain::models::cats::CatsEntity;
use crate::domain::models::repository::PaginatedResult;
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::repositories::repository::{PaginateQuery, RepositoryError};

/// 猫集合名称
pub const CATS_COLLECTION: &str = "cats";

/// 猫仓库的文档数据库实现
pub type CatsMongoRepository = MongoRepository<CatsEntity>;

impl CatsMongoRepository {
    /// 使用默认集合创建仓库
    pub fn for_cats(client: Client, database: &str) -> Self {
        MongoRepository::new(client, database, CATS_COLLECTION)
    }
}

#[async_trait]
impl CatsRepository for CatsMongoRepository {
    async fn paginate(
        &self,
        query: &PaginateQuery,
    ) -> Result<PaginatedResult<CatsEntity>, RepositoryError> {
        self.paginate_entities(query).await
    }
}
