// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use serde_json::Value;

use crate::application::dto::cats_request::CatsListInput;
use crate::application::errors::CatsError;
use crate::domain::models::cats::CatsEntity;
use crate::domain::models::repository::PaginatedResult;
use crate::domain::repositories::cats_repository::{CatsRepository, CATS_SORT_FIELDS};
use crate::domain::repositories::repository::{Filter, PaginateQuery, Sort, SortOrder};
use crate::utils::validators::{validate_schema, ValidationError, ValidationIssue};

const DEFAULT_PAGE: u64 = 1;
const DEFAULT_LIMIT: u64 = 10;

/// 搜索字段的匹配方式
enum SearchKind {
    Like,
    Equal,
}

fn search_kind(field: &str) -> Option<SearchKind> {
    match field {
        "name" | "breed" => Some(SearchKind::Like),
        "age" => Some(SearchKind::Equal),
        _ => None,
    }
}

/// 分页列表用例
pub struct CatsListUseCase<R: CatsRepository> {
    repository: Arc<R>,
    partition: String,
}

impl<R: CatsRepository> CatsListUseCase<R> {
    pub fn new(repository: Arc<R>, partition: impl Into<String>) -> Self {
        Self {
            repository,
            partition: partition.into(),
        }
    }

    pub async fn execute(&self, input: &Value) -> Result<PaginatedResult<CatsEntity>, CatsError> {
        let input: CatsListInput = validate_schema(input)?;
        let query = self.build_query(input)?;
        Ok(self.repository.paginate(&query).await?)
    }

    fn build_query(&self, input: CatsListInput) -> Result<PaginateQuery, ValidationError> {
        let mut issues = Vec::new();

        let mut sort = Vec::new();
        for (field, order) in input.sort.unwrap_or_default() {
            if CATS_SORT_FIELDS.contains(&field.as_str()) {
                sort.push(Sort { field, order });
            } else {
                issues.push(ValidationIssue::new(
                    "Sort field not allowed",
                    format!("sort.{field}"),
                ));
            }
        }
        if sort.is_empty() {
            sort.push(Sort {
                field: "createdAt".to_string(),
                order: SortOrder::Desc,
            });
        }

        let mut filter = Filter::new();
        for (field, value) in input.search.unwrap_or_default() {
            match (search_kind(&field), value) {
                (Some(SearchKind::Like), Value::String(text)) => {
                    filter = filter.like(field, text);
                }
                (Some(SearchKind::Equal), value @ Value::Number(_)) => {
                    filter = filter.eq(field, value);
                }
                // Query strings carry numbers as text
                (Some(SearchKind::Equal), Value::String(text)) => match text.parse::<i64>() {
                    Ok(number) => filter = filter.eq(field, number),
                    Err(_) => issues.push(ValidationIssue::new(
                        "Invalid search value",
                        format!("search.{field}"),
                    )),
                },
                (Some(_), _) => issues.push(ValidationIssue::new(
                    "Invalid search value",
                    format!("search.{field}"),
                )),
                (None, _) => issues.push(ValidationIssue::new(
                    "Search field not allowed",
                    format!("search.{field}"),
                )),
            }
        }

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(PaginateQuery {
            page: input.page.unwrap_or(DEFAULT_PAGE),
            limit: input.limit.unwrap_or(DEFAULT_LIMIT),
            sort,
            filter,
            partition: Some(self.partition.clone()),
        })
    }
}
