// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::marker::PhantomData;

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Bson, Document};
use mongodb::{Client, ClientSession, Collection};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::domain::models::repository::{
    CreatedModel, PaginatedResult, PersistedEntity, RemovedModel, UpdatedModel,
};
use crate::domain::repositories::repository::{
    Filter, FilterOperator, PaginateQuery, Repository, RepositoryError, RepositoryOptions,
    SortOrder, TransactionSession,
};

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        RepositoryError::DocumentStore(err.to_string())
    }
}

/// 文档数据库事务会话
pub struct MongoSession {
    session: ClientSession,
}

#[async_trait]
impl TransactionSession for MongoSession {
    async fn commit(mut self) -> Result<(), RepositoryError> {
        self.session.commit_transaction().await?;
        Ok(())
    }

    async fn rollback(mut self) -> Result<(), RepositoryError> {
        self.session.abort_transaction().await?;
        Ok(())
    }
}

/// 基于集合的通用文档仓库
///
/// 实体以序列化后的字段存储，`id` 映射为 `_id`（UUID 字符串）。
/// 文档数据库没有分区概念，查询选项中的分区被忽略。
pub struct MongoRepository<T> {
    client: Client,
    collection: Collection<Document>,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for MongoRepository<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            collection: self.collection.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: PersistedEntity> MongoRepository<T> {
    pub fn new(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection::<Document>(collection);
        Self {
            client,
            collection,
            _entity: PhantomData,
        }
    }

    /// 分页查询，返回当前页数据与匹配总数
    pub async fn paginate_entities(
        &self,
        query: &PaginateQuery,
    ) -> Result<PaginatedResult<T>, RepositoryError> {
        let filter = filter_document(&query.filter)?;
        let total = self.collection.count_documents(filter).await?;
        let docs = self.find(&query.filter, &query.options()).await?;

        Ok(PaginatedResult {
            docs,
            page: query.page,
            limit: query.limit,
            total,
        })
    }
}

#[async_trait]
impl<T: PersistedEntity> Repository<T> for MongoRepository<T> {
    type Session = MongoSession;

    async fn create(
        &self,
        entity: &T,
        session: Option<&mut MongoSession>,
    ) -> Result<CreatedModel, RepositoryError> {
        let document = to_document(entity)?;
        let insert = self.collection.insert_one(document);
        match session {
            Some(session) => insert.session(&mut session.session).await?,
            None => insert.await?,
        };

        Ok(CreatedModel {
            id: entity.id(),
            created: true,
        })
    }

    async fn insert_many(
        &self,
        entities: &[T],
        session: Option<&mut MongoSession>,
    ) -> Result<(), RepositoryError> {
        if entities.is_empty() {
            return Ok(());
        }
        let documents = entities
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;

        let insert = self.collection.insert_many(documents);
        match session {
            Some(session) => insert.session(&mut session.session).await?,
            None => insert.await?,
        };
        Ok(())
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Vec<T>, RepositoryError> {
        let query = filter_document(filter)?;
        debug!(filter = %query, "Querying documents");

        let mut find = self.collection.find(query);
        if !options.sort.is_empty() {
            find = find.sort(sort_document(options));
        }
        if let Some(skip) = options.skip {
            find = find.skip(skip);
        }
        if let Some(limit) = options.limit {
            find = find.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let documents: Vec<Document> = find.await?.try_collect().await?;
        documents.into_iter().map(from_document).collect()
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        options: &RepositoryOptions,
    ) -> Result<Option<T>, RepositoryError> {
        self.find_one(&Filter::by_id(id), options).await
    }

    async fn find_one(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Option<T>, RepositoryError> {
        let options = RepositoryOptions {
            limit: Some(1),
            ..options.clone()
        };
        Ok(self.find(filter, &options).await?.into_iter().next())
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<T>, RepositoryError> {
        self.find(filter, &RepositoryOptions::default()).await
    }

    async fn update_one(
        &self,
        filter: &Filter,
        patch: &Value,
        _options: &RepositoryOptions,
        session: Option<&mut MongoSession>,
    ) -> Result<UpdatedModel, RepositoryError> {
        let Some(update) = set_document(patch)? else {
            return Ok(acknowledged());
        };
        let action = self.collection.update_one(filter_document(filter)?, update);
        let result = match session {
            Some(session) => action.session(&mut session.session).await?,
            None => action.await?,
        };

        Ok(UpdatedModel {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            acknowledged: true,
        })
    }

    async fn update_many(
        &self,
        filter: &Filter,
        patch: &Value,
        _options: &RepositoryOptions,
        session: Option<&mut MongoSession>,
    ) -> Result<UpdatedModel, RepositoryError> {
        let Some(update) = set_document(patch)? else {
            return Ok(acknowledged());
        };
        let action = self.collection.update_many(filter_document(filter)?, update);
        let result = match session {
            Some(session) => action.session(&mut session.session).await?,
            None => action.await?,
        };

        Ok(UpdatedModel {
            matched_count: result.matched_count,
            modified_count: result.modified_count,
            acknowledged: true,
        })
    }

    async fn remove(&self, filter: &Filter) -> Result<RemovedModel, RepositoryError> {
        let result = self.collection.delete_one(filter_document(filter)?).await?;
        Ok(RemovedModel::from_count(result.deleted_count))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let count = self
            .collection
            .count_documents(doc! { "_id": id.to_string() })
            .limit(1)
            .await?;
        Ok(count > 0)
    }

    async fn start_session(&self) -> Result<MongoSession, RepositoryError> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        Ok(MongoSession { session })
    }
}

fn acknowledged() -> UpdatedModel {
    UpdatedModel {
        acknowledged: true,
        ..Default::default()
    }
}

fn storage_field(field: &str) -> &str {
    if field == "id" {
        "_id"
    } else {
        field
    }
}

fn to_bson(value: &Value) -> Result<Bson, RepositoryError> {
    bson::to_bson(value).map_err(|e| RepositoryError::DocumentStore(e.to_string()))
}

fn json_to_document(value: &Value) -> Result<Document, RepositoryError> {
    match to_bson(value)? {
        Bson::Document(document) => Ok(document),
        other => Err(RepositoryError::Internal(format!(
            "expected a document, got {other}"
        ))),
    }
}

fn to_document<T: Serialize>(entity: &T) -> Result<Document, RepositoryError> {
    let mut value = serde_json::to_value(entity)?;
    if let Some(object) = value.as_object_mut() {
        if let Some(id) = object.remove("id") {
            object.insert("_id".to_string(), id);
        }
    }
    json_to_document(&value)
}

fn from_document<T: PersistedEntity>(document: Document) -> Result<T, RepositoryError> {
    let mut value = Bson::Document(document).into_relaxed_extjson();
    if let Some(object) = value.as_object_mut() {
        if let Some(id) = object.remove("_id") {
            object.insert("id".to_string(), id);
        }
    }
    Ok(serde_json::from_value(value)?)
}

/// 构建 `$set` 更新文档，补丁为空时返回 `None`
fn set_document(patch: &Value) -> Result<Option<Document>, RepositoryError> {
    let object = patch
        .as_object()
        .ok_or_else(|| RepositoryError::InvalidFilter("patch must be an object".to_string()))?;

    let mut set = Document::new();
    for (field, value) in object {
        if field == "id" {
            continue;
        }
        set.insert(field.clone(), to_bson(value)?);
    }

    if set.is_empty() {
        return Ok(None);
    }
    Ok(Some(doc! { "$set": set }))
}

/// 将过滤条件翻译为查询文档，并始终排除已软删除的记录
fn filter_document(filter: &Filter) -> Result<Document, RepositoryError> {
    let mut clauses = vec![Bson::Document(doc! { "deletedAt": Bson::Null })];

    for condition in filter.conditions() {
        let value = match condition.operator {
            FilterOperator::Eq => to_bson(&condition.value)?,
            FilterOperator::Like => {
                let text = condition.value.as_str().ok_or_else(|| {
                    RepositoryError::InvalidFilter(format!(
                        "like on `{}` needs text",
                        condition.field
                    ))
                })?;
                Bson::Document(doc! { "$regex": regex::escape(text), "$options": "i" })
            }
            FilterOperator::In => {
                if !condition.value.is_array() {
                    return Err(RepositoryError::InvalidFilter(format!(
                        "in on `{}` needs a list",
                        condition.field
                    )));
                }
                Bson::Document(doc! { "$in": to_bson(&condition.value)? })
            }
            FilterOperator::IsNull => Bson::Null,
        };

        let mut clause = Document::new();
        clause.insert(storage_field(&condition.field), value);
        clauses.push(Bson::Document(clause));
    }

    Ok(doc! { "$and": clauses })
}

fn sort_document(options: &RepositoryOptions) -> Document {
    let mut sort = Document::new();
    for item in &options.sort {
        let direction = match item.order {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        };
        sort.insert(storage_field(&item.field).to_string(), direction);
    }
    sort
}
