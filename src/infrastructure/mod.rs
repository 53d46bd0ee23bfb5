// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层
///
/// 存储后端连接、仓库实现和服务实现
pub mod database;
pub mod repositories;
pub mod services;
