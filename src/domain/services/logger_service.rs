// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;

/// 日志服务特质
///
/// 注入到用例中的结构化日志能力。`context` 是附带的结构化数据，
/// 具体的输出格式和传输由实现决定。
pub trait LoggerService: Send + Sync {
    fn info(&self, message: &str, context: Value);
    fn warn(&self, message: &str, context: Value);
    fn error(&self, message: &str, context: Value);
}
