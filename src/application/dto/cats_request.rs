// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::domain::repositories::repository::SortOrder;
use crate::utils::validators::{FieldKind, FieldSpec, InputSchema};

/// 创建猫的输入
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CatsCreateInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 200))]
    pub breed: String,
    #[validate(range(min = 0, max = 1000))]
    pub age: i32,
}

impl InputSchema for CatsCreateInput {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("breed", FieldKind::String),
        FieldSpec::required("age", FieldKind::Integer),
    ];
}

/// 按ID操作的输入
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CatsIdInput {
    pub id: Uuid,
}

impl InputSchema for CatsIdInput {
    const FIELDS: &'static [FieldSpec] = &[FieldSpec::required("id", FieldKind::Uuid)];
}

pub type CatsDeleteInput = CatsIdInput;
pub type CatsGetByIdInput = CatsIdInput;

/// 更新猫的输入，除ID外均为可选
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CatsUpdateInput {
    pub id: Uuid,
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 200))]
    pub breed: Option<String>,
    #[validate(range(min = 0, max = 1000))]
    pub age: Option<i32>,
}

impl InputSchema for CatsUpdateInput {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::required("id", FieldKind::Uuid),
        FieldSpec::optional("name", FieldKind::String),
        FieldSpec::optional("breed", FieldKind::String),
        FieldSpec::optional("age", FieldKind::Integer),
    ];
}

/// 分页列表输入
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CatsListInput {
    /// 上限保证 `(page - 1) * limit` 不超过 `i64::MAX`
    #[validate(range(min = 1, max = 92_233_720_368_547_758_u64))]
    pub page: Option<u64>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u64>,
    /// 字段 → 排序方向
    pub sort: Option<BTreeMap<String, SortOrder>>,
    /// 字段 → 搜索值
    pub search: Option<BTreeMap<String, Value>>,
}

impl InputSchema for CatsListInput {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::optional("page", FieldKind::Integer),
        FieldSpec::optional("limit", FieldKind::Integer),
        FieldSpec::optional("sort", FieldKind::Object),
        FieldSpec::optional("search", FieldKind::Object),
    ];
}
