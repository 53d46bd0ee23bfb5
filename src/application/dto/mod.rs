// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 数据传输对象模块
///
/// 定义用例的输入模式
/// 原始请求数据先按这些模式校验，再进入用例主体
pub mod cats_request;
