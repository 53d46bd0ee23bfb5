// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::models::cats::CatsEntity;
use crate::domain::models::repository::{
    CreatedModel, PaginatedResult, RemovedModel, UpdatedModel,
};
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::repositories::repository::{
    Filter, FilterOperator, PaginateQuery, Repository, RepositoryError, RepositoryOptions,
    TransactionSession,
};
use crate::domain::services::logger_service::LoggerService;

#[derive(Default)]
pub struct SessionCounters {
    pub commits: AtomicUsize,
    pub rollbacks: AtomicUsize,
}

pub struct MockSession {
    counters: Arc<SessionCounters>,
}

#[async_trait]
impl TransactionSession for MockSession {
    async fn commit(self) -> Result<(), RepositoryError> {
        self.counters.commits.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        self.counters.rollbacks.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

type UpdateCall = (Filter, Value, RepositoryOptions);

/// 内存中的仓库替身，记录会话和更新调用
#[derive(Default)]
pub struct MockCatsRepository {
    records: Mutex<Vec<CatsEntity>>,
    updates: Mutex<Vec<UpdateCall>>,
    paginations: Mutex<Vec<PaginateQuery>>,
    create_error: Option<String>,
    update_error: Option<String>,
    miss_updates: bool,
    pub counters: Arc<SessionCounters>,
    pub sessions_started: AtomicUsize,
    pub creates: AtomicUsize,
}

impl MockCatsRepository {
    pub fn with_records(records: Vec<CatsEntity>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Default::default()
        }
    }

    pub fn failing_create(message: &str) -> Self {
        Self {
            create_error: Some(message.to_string()),
            ..Default::default()
        }
    }

    pub fn fail_update(mut self, message: &str) -> Self {
        self.update_error = Some(message.to_string());
        self
    }

    /// 更新调用不命中任何记录，模拟查找之后被并发删除
    pub fn miss_updates(mut self) -> Self {
        self.miss_updates = true;
        self
    }

    pub fn snapshot(&self) -> Vec<CatsEntity> {
        self.records.lock().unwrap().clone()
    }

    pub fn update_calls(&self) -> Vec<UpdateCall> {
        self.updates.lock().unwrap().clone()
    }

    pub fn last_paginate(&self) -> Option<PaginateQuery> {
        self.paginations.lock().unwrap().last().cloned()
    }

    fn active_matching(&self, filter: &Filter) -> Vec<CatsEntity> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|cat| cat.deleted_at.is_none() && matches(cat, filter))
            .cloned()
            .collect()
    }

    fn apply_patch(&self, filter: &Filter, patch: &Value, many: bool) -> UpdatedModel {
        if self.miss_updates {
            return UpdatedModel {
                acknowledged: true,
                ..Default::default()
            };
        }
        let mut records = self.records.lock().unwrap();
        let mut matched = 0;
        for cat in records
            .iter_mut()
            .filter(|cat| cat.deleted_at.is_none() && matches(cat, filter))
        {
            let mut merged = serde_json::to_value(&*cat).unwrap();
            if let (Some(target), Some(source)) = (merged.as_object_mut(), patch.as_object()) {
                for (key, value) in source {
                    if key != "id" {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
            *cat = serde_json::from_value(merged).unwrap();
            matched += 1;
            if !many {
                break;
            }
        }
        UpdatedModel {
            matched_count: matched,
            modified_count: matched,
            acknowledged: true,
        }
    }
}

/// 按序列化字段匹配过滤条件
pub fn matches(cat: &CatsEntity, filter: &Filter) -> bool {
    let value = serde_json::to_value(cat).unwrap();
    filter.conditions().iter().all(|condition| {
        let field = value.get(&condition.field).unwrap_or(&Value::Null);
        match condition.operator {
            FilterOperator::Eq => field == &condition.value,
            FilterOperator::Like => match (field.as_str(), condition.value.as_str()) {
                (Some(haystack), Some(needle)) => haystack
                    .to_lowercase()
                    .contains(&needle.to_lowercase()),
                _ => false,
            },
            FilterOperator::In => condition
                .value
                .as_array()
                .map(|values| values.contains(field))
                .unwrap_or(false),
            FilterOperator::IsNull => field.is_null(),
        }
    })
}

#[async_trait]
impl Repository<CatsEntity> for MockCatsRepository {
    type Session = MockSession;

    async fn create(
        &self,
        entity: &CatsEntity,
        _session: Option<&mut MockSession>,
    ) -> Result<CreatedModel, RepositoryError> {
        if let Some(message) = &self.create_error {
            return Err(RepositoryError::Internal(message.clone()));
        }
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().push(entity.clone());
        Ok(CreatedModel {
            id: entity.id,
            created: true,
        })
    }

    async fn insert_many(
        &self,
        entities: &[CatsEntity],
        _session: Option<&mut MockSession>,
    ) -> Result<(), RepositoryError> {
        self.records.lock().unwrap().extend_from_slice(entities);
        Ok(())
    }

    async fn find(
        &self,
        filter: &Filter,
        _options: &RepositoryOptions,
    ) -> Result<Vec<CatsEntity>, RepositoryError> {
        Ok(self.active_matching(filter))
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        _options: &RepositoryOptions,
    ) -> Result<Option<CatsEntity>, RepositoryError> {
        Ok(self.active_matching(&Filter::by_id(id)).into_iter().next())
    }

    async fn find_one(
        &self,
        filter: &Filter,
        _options: &RepositoryOptions,
    ) -> Result<Option<CatsEntity>, RepositoryError> {
        Ok(self.active_matching(filter).into_iter().next())
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<CatsEntity>, RepositoryError> {
        Ok(self.active_matching(filter))
    }

    async fn update_one(
        &self,
        filter: &Filter,
        patch: &Value,
        options: &RepositoryOptions,
        _session: Option<&mut MockSession>,
    ) -> Result<UpdatedModel, RepositoryError> {
        self.updates
            .lock()
            .unwrap()
            .push((filter.clone(), patch.clone(), options.clone()));
        if let Some(message) = &self.update_error {
            return Err(RepositoryError::Internal(message.clone()));
        }
        Ok(self.apply_patch(filter, patch, false))
    }

    async fn update_many(
        &self,
        filter: &Filter,
        patch: &Value,
        options: &RepositoryOptions,
        _session: Option<&mut MockSession>,
    ) -> Result<UpdatedModel, RepositoryError> {
        self.updates
            .lock()
            .unwrap()
            .push((filter.clone(), patch.clone(), options.clone()));
        Ok(self.apply_patch(filter, patch, true))
    }

    async fn remove(&self, filter: &Filter) -> Result<RemovedModel, RepositoryError> {
        let mut records = self.records.lock().unwrap();
        let position = records
            .iter()
            .position(|cat| cat.deleted_at.is_none() && matches(cat, filter));
        let deleted = match position {
            Some(index) => {
                records.remove(index);
                1
            }
            None => 0,
        };
        Ok(RemovedModel::from_count(deleted))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        Ok(self.records.lock().unwrap().iter().any(|cat| cat.id == id))
    }

    async fn start_session(&self) -> Result<MockSession, RepositoryError> {
        self.sessions_started.fetch_add(1, Ordering::SeqCst);
        Ok(MockSession {
            counters: self.counters.clone(),
        })
    }
}

#[async_trait]
impl CatsRepository for MockCatsRepository {
    async fn paginate(
        &self,
        query: &PaginateQuery,
    ) -> Result<PaginatedResult<CatsEntity>, RepositoryError> {
        self.paginations.lock().unwrap().push(query.clone());
        let all = self.active_matching(&query.filter);
        let total = all.len() as u64;
        let docs = all
            .into_iter()
            .skip(query.skip() as usize)
            .take(query.limit as usize)
            .collect();
        Ok(PaginatedResult {
            docs,
            page: query.page,
            limit: query.limit,
            total,
        })
    }
}

/// 记录所有日志调用
#[derive(Default)]
pub struct RecordingLogger {
    entries: Mutex<Vec<(String, String, Value)>>,
}

impl RecordingLogger {
    /// (级别, 消息, 上下文)
    pub fn entries(&self) -> Vec<(String, String, Value)> {
        self.entries.lock().unwrap().clone()
    }

    fn record(&self, level: &str, message: &str, context: Value) {
        self.entries
            .lock()
            .unwrap()
            .push((level.to_string(), message.to_string(), context));
    }
}

impl LoggerService for RecordingLogger {
    fn info(&self, message: &str, context: Value) {
        self.record("info", message, context);
    }

    fn warn(&self, message: &str, context: Value) {
        self.record("warn", message, context);
    }

    fn error(&self, message: &str, context: Value) {
        self.record("error", message, context);
    }
}
