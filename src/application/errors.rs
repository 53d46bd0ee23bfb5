// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use thiserror::Error;

use crate::domain::repositories::repository::RepositoryError;
use crate::utils::validators::ValidationError;

/// 用例错误类型
///
/// 仓库错误原样透传，不做包装或改写。
#[derive(Error, Debug)]
pub enum CatsError {
    /// 输入校验失败，发生在任何副作用之前
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// 记录不存在
    #[error("Not found: {0}")]
    NotFound(String),
    /// 存储或事务错误
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
