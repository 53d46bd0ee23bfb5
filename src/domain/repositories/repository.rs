// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::models::repository::{
    CreatedModel, PersistedEntity, RemovedModel, UpdatedModel,
};

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 关系型数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 文档数据库错误
    #[error("Document store error: {0}")]
    DocumentStore(String),
    /// 过滤条件无法转换为后端查询
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
    /// 实体序列化失败
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// 内部错误
    #[error("Internal error: {0}")]
    Internal(String),
}

/// 过滤操作符
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Eq,
    Like,
    In,
    IsNull,
}

/// 单个过滤条件
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCondition {
    /// 字段名（序列化后的名称，例如 `deletedAt`）
    pub field: String,
    pub operator: FilterOperator,
    pub value: Value,
}

/// 与存储后端无关的过滤条件
///
/// 条件之间是 AND 关系。各仓库实现负责把它翻译成自己的查询语言，
/// 后端特有的类型不会越过仓库接口。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<FilterCondition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按ID过滤
    pub fn by_id(id: Uuid) -> Self {
        Self::new().eq("id", id.to_string())
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push(field, FilterOperator::Eq, value.into())
    }

    /// 模糊匹配，值中不需要包含通配符
    pub fn like(self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(field, FilterOperator::Like, Value::String(value.into()))
    }

    pub fn is_in(self, field: impl Into<String>, values: Vec<Value>) -> Self {
        self.push(field, FilterOperator::In, Value::Array(values))
    }

    pub fn is_null(self, field: impl Into<String>) -> Self {
        self.push(field, FilterOperator::IsNull, Value::Null)
    }

    pub fn conditions(&self) -> &[FilterCondition] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    fn push(mut self, field: impl Into<String>, operator: FilterOperator, value: Value) -> Self {
        self.conditions.push(FilterCondition {
            field: field.into(),
            operator,
            value,
        });
        self
    }
}

/// 排序方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// 排序字段
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

/// 仓库查询选项
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepositoryOptions {
    /// 逻辑分区（关系型后端中的 schema）
    pub partition: Option<String>,
    pub sort: Vec<Sort>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl RepositoryOptions {
    pub fn with_partition(partition: impl Into<String>) -> Self {
        Self {
            partition: Some(partition.into()),
            ..Default::default()
        }
    }
}

/// 分页查询参数
#[derive(Debug, Clone, PartialEq)]
pub struct PaginateQuery {
    pub page: u64,
    pub limit: u64,
    pub sort: Vec<Sort>,
    pub filter: Filter,
    pub partition: Option<String>,
}

impl PaginateQuery {
    pub fn skip(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }

    /// 转换为通用查询选项
    pub fn options(&self) -> RepositoryOptions {
        RepositoryOptions {
            partition: self.partition.clone(),
            sort: self.sort.clone(),
            skip: Some(self.skip()),
            limit: Some(self.limit),
        }
    }
}

/// 事务会话
///
/// 由 [`Repository::start_session`] 打开，提交或回滚后即被消耗，
/// 因此一个会话不可能被提交两次，也不会在调用之间共享。
#[async_trait]
pub trait TransactionSession: Send {
    async fn commit(self) -> Result<(), RepositoryError>;
    async fn rollback(self) -> Result<(), RepositoryError>;
}

/// 通用仓库适配器特质
///
/// 任何存储后端都必须满足的能力集合。所有基于过滤条件的读写操作
/// 都只作用于未被软删除的记录。
#[async_trait]
pub trait Repository<T: PersistedEntity>: Send + Sync {
    /// 后端的事务会话类型
    type Session: TransactionSession;

    /// 持久化实体
    async fn create(
        &self,
        entity: &T,
        session: Option<&mut Self::Session>,
    ) -> Result<CreatedModel, RepositoryError>;

    /// 批量插入
    async fn insert_many(
        &self,
        entities: &[T],
        session: Option<&mut Self::Session>,
    ) -> Result<(), RepositoryError>;

    async fn find(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Vec<T>, RepositoryError>;

    /// 根据ID查找，不存在时返回 `None`
    async fn find_by_id(
        &self,
        id: Uuid,
        options: &RepositoryOptions,
    ) -> Result<Option<T>, RepositoryError>;

    async fn find_one(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Option<T>, RepositoryError>;

    async fn find_all(&self, filter: &Filter) -> Result<Vec<T>, RepositoryError>;

    /// 查找字段值在给定集合中的记录
    async fn find_in(&self, field: &str, values: Vec<Value>) -> Result<Vec<T>, RepositoryError> {
        self.find(
            &Filter::new().is_in(field, values),
            &RepositoryOptions::default(),
        )
        .await
    }

    /// 更新第一条匹配记录，`patch` 为序列化后的字段对象
    async fn update_one(
        &self,
        filter: &Filter,
        patch: &Value,
        options: &RepositoryOptions,
        session: Option<&mut Self::Session>,
    ) -> Result<UpdatedModel, RepositoryError>;

    async fn update_many(
        &self,
        filter: &Filter,
        patch: &Value,
        options: &RepositoryOptions,
        session: Option<&mut Self::Session>,
    ) -> Result<UpdatedModel, RepositoryError>;

    /// 物理删除一条匹配记录
    async fn remove(&self, filter: &Filter) -> Result<RemovedModel, RepositoryError>;

    /// 检查ID是否存在（包含已软删除的记录）
    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError>;

    /// 开启事务会话
    async fn start_session(&self) -> Result<Self::Session, RepositoryError>;

    /// 幂等的批量初始化
    ///
    /// 任何实体缺少ID时直接失败，不做任何写入；已存在的ID被跳过。
    async fn seed(&self, entities: &[T]) -> Result<(), RepositoryError> {
        if entities.iter().any(|entity| entity.id().is_nil()) {
            return Err(RepositoryError::Internal("seed id is required".to_string()));
        }

        for entity in entities {
            if !self.exists(entity.id()).await? {
                self.create(entity, None).await?;
            }
        }

        Ok(())
    }
}
