// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::domain::services::logger_service::LoggerService;

/// 基于 tracing 的日志服务实现
///
/// 上下文以 JSON 字段 `context` 附加在事件上，`source` 标记调用方。
#[derive(Debug, Clone)]
pub struct TracingLogger {
    source: String,
}

impl TracingLogger {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

impl LoggerService for TracingLogger {
    fn info(&self, message: &str, context: Value) {
        info!(source = %self.source, context = %context, "{}", message);
    }

    fn warn(&self, message: &str, context: Value) {
        warn!(source = %self.source, context = %context, "{}", message);
    }

    fn error(&self, message: &str, context: Value) {
        error!(source = %self.source, context = %context, "{}", message);
    }
}
