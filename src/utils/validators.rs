// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;
use validator::Validate;

/// 字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Number,
    Integer,
    Uuid,
    Object,
}

impl FieldKind {
    fn expected(&self) -> &'static str {
        match self {
            FieldKind::String | FieldKind::Uuid => "string",
            FieldKind::Number => "number",
            FieldKind::Integer => "integer",
            FieldKind::Object => "object",
        }
    }
}

/// 输入模式中的单个字段约束
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// 单条校验问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub message: String,
    pub path: String,
}

impl ValidationIssue {
    pub fn new(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: path.into(),
        }
    }
}

/// 校验错误
///
/// `issues` 按模式中字段的声明顺序排列，每个违规字段一条。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation error: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn single(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            issues: vec![ValidationIssue::new(message, path)],
        }
    }
}

fn summarize(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} ({})", issue.message, issue.path))
        .collect::<Vec<_>>()
        .join(", ")
}

/// 输入模式
///
/// `FIELDS` 声明字段的存在性和类型约束，取值范围等约束由 `validator` 的派生宏负责。
pub trait InputSchema: DeserializeOwned + Validate {
    const FIELDS: &'static [FieldSpec];
}

/// 根据模式解析并校验输入
///
/// 先按声明顺序检查每个字段的存在性和类型，收集全部问题而不是在第一个问题处停止；
/// 结构正确后再反序列化并执行 `validator` 约束。
///
/// # 返回值
///
/// * `Ok(T)` - 解析后的强类型输入
/// * `Err(ValidationError)` - 所有违规字段的问题列表
pub fn validate_schema<T: InputSchema>(input: &Value) -> Result<T, ValidationError> {
    let object = match input {
        Value::Object(map) => map,
        other => {
            return Err(ValidationError::single(
                format!("Expected object, received {}", json_type(other)),
                "",
            ))
        }
    };

    let mut issues = Vec::new();
    for field in T::FIELDS {
        match object.get(field.name) {
            None | Some(Value::Null) => {
                if field.required {
                    issues.push(ValidationIssue::new("Required", field.name));
                }
            }
            Some(value) => {
                if let Some(message) = check_kind(field.kind, value) {
                    issues.push(ValidationIssue::new(message, field.name));
                }
            }
        }
    }

    if !issues.is_empty() {
        return Err(ValidationError { issues });
    }

    let parsed: T = serde_json::from_value(input.clone())
        .map_err(|e| ValidationError::single(e.to_string(), ""))?;

    if let Err(errors) = parsed.validate() {
        return Err(ValidationError {
            issues: ordered_constraint_issues::<T>(&errors),
        });
    }

    Ok(parsed)
}

fn check_kind(kind: FieldKind, value: &Value) -> Option<String> {
    let matches = match kind {
        FieldKind::String => value.is_string(),
        FieldKind::Number => value.is_number(),
        FieldKind::Integer => value.is_i64() || value.is_u64(),
        FieldKind::Object => value.is_object(),
        FieldKind::Uuid => {
            return match value.as_str() {
                Some(s) if Uuid::parse_str(s).is_ok() => None,
                Some(_) => Some("Invalid uuid".to_string()),
                None => Some(format!("Expected string, received {}", json_type(value))),
            };
        }
    };

    if matches {
        None
    } else {
        Some(format!(
            "Expected {}, received {}",
            kind.expected(),
            json_type(value)
        ))
    }
}

fn ordered_constraint_issues<T: InputSchema>(
    errors: &validator::ValidationErrors,
) -> Vec<ValidationIssue> {
    let field_errors = errors.field_errors();

    let mut names: Vec<&str> = T::FIELDS
        .iter()
        .map(|f| f.name)
        .filter(|name| field_errors.contains_key(*name))
        .collect();

    // Constraints on fields that are not part of the declared layout go last
    let mut rest: Vec<&str> = field_errors
        .keys()
        .map(|k| k.as_ref())
        .filter(|k| !T::FIELDS.iter().any(|f| f.name == *k))
        .collect();
    rest.sort_unstable();
    names.extend(rest);

    let mut issues = Vec::new();
    for name in names {
        if let Some(list) = field_errors.get(name) {
            for error in list.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                issues.push(ValidationIssue::new(message, name));
            }
        }
    }
    issues
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
