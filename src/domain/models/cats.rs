// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repository::PersistedEntity;

/// 猫实体
///
/// 表示一条猫记录。删除是软删除：`deleted_at` 为空表示记录有效，
/// 调用 [`CatsEntity::set_delete`] 后记录被视为逻辑删除，但不会从存储中物理移除。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatsEntity {
    /// 唯一标识符，缺省时在构造阶段生成
    #[serde(default)]
    pub id: Uuid,
    /// 名字
    pub name: String,
    /// 品种
    pub breed: String,
    /// 年龄
    pub age: i32,
    /// 创建时间
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// 更新时间
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// 软删除标记
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl CatsEntity {
    /// 创建一个新的猫实体
    ///
    /// # 参数
    ///
    /// * `name` - 名字
    /// * `breed` - 品种
    /// * `age` - 年龄
    ///
    /// # 返回值
    ///
    /// 返回带有新生成ID和创建时间的实体
    pub fn new(name: impl Into<String>, breed: impl Into<String>, age: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            breed: breed.into(),
            age,
            created_at: Some(now),
            updated_at: Some(now),
            deleted_at: None,
        }
    }

    /// 从已持久化的记录重建实体
    ///
    /// ID 为空（nil）时会生成新的 ID。
    pub fn hydrate(mut self) -> Self {
        if self.id.is_nil() {
            self.id = Uuid::new_v4();
        }
        self
    }

    /// 标记为已删除
    pub fn set_delete(&mut self) {
        self.deleted_at = Some(Utc::now());
    }

    /// 刷新更新时间
    pub fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl PersistedEntity for CatsEntity {
    fn id(&self) -> Uuid {
        self.id
    }
}
