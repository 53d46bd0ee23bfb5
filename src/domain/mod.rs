// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层
///
/// 实体、仓库接口和领域服务接口，不依赖具体的存储实现
pub mod models;
pub mod repositories;
pub mod services;
