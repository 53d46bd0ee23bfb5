// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

/// 可持久化实体
///
/// 仓库适配器对实体的最低要求：可序列化、可克隆，并且拥有唯一标识符。
pub trait PersistedEntity:
    Clone + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// 实体唯一标识符，nil 表示尚未分配
    fn id(&self) -> Uuid;
}

/// 创建操作结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedModel {
    pub id: Uuid,
    pub created: bool,
}

/// 更新操作结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedModel {
    /// 命中过滤条件的记录数
    pub matched_count: u64,
    /// 实际修改的记录数
    pub modified_count: u64,
    pub acknowledged: bool,
}

/// 删除操作结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovedModel {
    pub deleted_count: u64,
    pub deleted: bool,
}

impl RemovedModel {
    pub fn from_count(deleted_count: u64) -> Self {
        Self {
            deleted_count,
            deleted: deleted_count > 0,
        }
    }
}

/// 分页查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    pub docs: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}
