// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 用例模块
///
/// 包含应用程序的所有业务用例实现
/// 每个用例代表一个完整的业务流程：校验输入、划定事务边界、调用仓库
pub mod cats_create;
pub mod cats_delete;
pub mod cats_get_by_id;
pub mod cats_list;
pub mod cats_update;

#[cfg(test)]
pub(crate) mod test_support;
