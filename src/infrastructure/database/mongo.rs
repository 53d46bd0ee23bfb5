// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::MongoSettings;
use mongodb::{bson::doc, options::ClientOptions, Client};
use tracing::info;

/// 创建文档数据库客户端
///
/// 连接建立后对目标数据库执行一次 `ping`，尽早暴露配置错误。
/// 客户端内部带连接池，可以直接克隆共享。
pub async fn connect(settings: &MongoSettings) -> Result<Client, mongodb::error::Error> {
    let mut options = ClientOptions::parse(&settings.url).await?;
    options.app_name = Some(env!("CARGO_PKG_NAME").to_string());

    let client = Client::with_options(options)?;
    client
        .database(&settings.database)
        .run_command(doc! { "ping": 1 })
        .await?;

    info!(database = %settings.database, "Document database connected");
    Ok(client)
}
