// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::errors::CatsError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，提供统一的错误处理接口
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_message = self.0.to_string();

        match self.0.downcast_ref::<CatsError>() {
            Some(CatsError::Validation(validation)) => {
                let body = Json(json!({
                    "error": error_message,
                    "issues": validation.issues,
                }));
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            Some(CatsError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": error_message }))).into_response()
            }
            _ => {
                error!(error = %error_message, "Request failed");
                let body = Json(json!({ "error": error_message }));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
