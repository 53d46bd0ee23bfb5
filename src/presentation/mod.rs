// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 表示层
///
/// HTTP 路由、处理器和错误响应映射
pub mod errors;
pub mod handlers;
pub mod routes;
