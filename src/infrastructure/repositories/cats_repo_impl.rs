// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{
    Alias, Asterisk, Condition, Expr, Func, IntoTableRef, Order, Query, SelectStatement,
    SimpleExpr, TableRef,
};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, EntityTrait,
    ExecResult, Iterable, Statement, TransactionTrait, Value as SeaValue,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::models::cats::CatsEntity;
use crate::domain::models::repository::{
    CreatedModel, PaginatedResult, RemovedModel, UpdatedModel,
};
use crate::domain::repositories::cats_repository::CatsRepository;
use crate::domain::repositories::repository::{
    Filter, FilterOperator, PaginateQuery, Repository, RepositoryError, RepositoryOptions,
    SortOrder, TransactionSession,
};
use crate::infrastructure::database::entities::cats;

const TABLE: &str = "cats";

/// 关系型数据库事务会话
pub struct SeaOrmSession {
    transaction: DatabaseTransaction,
}

#[async_trait]
impl TransactionSession for SeaOrmSession {
    async fn commit(self) -> Result<(), RepositoryError> {
        self.transaction.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        self.transaction.rollback().await?;
        Ok(())
    }
}

/// 猫仓库的关系型实现
///
/// 表名按逻辑分区（PostgreSQL schema）限定。查询选项中的分区优先，
/// 否则使用构造时给出的默认分区，两者都没有时使用连接的默认 schema。
#[derive(Clone)]
pub struct CatsRepositoryImpl {
    db: Arc<DatabaseConnection>,
    partition: Option<String>,
}

impl CatsRepositoryImpl {
    /// 创建新的猫仓库实现
    pub fn new(db: Arc<DatabaseConnection>, partition: Option<String>) -> Self {
        Self { db, partition }
    }

    /// 确保分区 schema 及其中的 cats 表存在
    ///
    /// 分区表从迁移创建的 `public.cats` 复制结构。仅对 PostgreSQL 生效。
    pub async fn ensure_partition(&self) -> Result<(), RepositoryError> {
        let Some(partition) = self.partition.as_deref() else {
            return Ok(());
        };
        if self.db.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let schema = quote_ident(partition);
        self.db
            .execute_unprepared(&format!("CREATE SCHEMA IF NOT EXISTS {schema}"))
            .await?;
        self.db
            .execute_unprepared(&format!(
                "CREATE TABLE IF NOT EXISTS {schema}.\"{TABLE}\" (LIKE public.\"{TABLE}\" INCLUDING ALL)"
            ))
            .await?;

        info!(partition, "Cats partition ready");
        Ok(())
    }

    fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    fn table(&self, options: Option<&RepositoryOptions>) -> TableRef {
        let partition = options
            .and_then(|o| o.partition.as_deref())
            .or(self.partition.as_deref());
        match partition {
            Some(schema) => (Alias::new(schema), Alias::new(TABLE)).into_table_ref(),
            None => Alias::new(TABLE).into_table_ref(),
        }
    }

    fn select_statement(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Statement, RepositoryError> {
        let mut query = Query::select();
        query
            .columns(cats::Column::iter())
            .from(self.table(Some(options)))
            .cond_where(active_condition(filter)?);

        for sort in &options.sort {
            let order = match sort.order {
                SortOrder::Asc => Order::Asc,
                SortOrder::Desc => Order::Desc,
            };
            query.order_by(column(&sort.field)?, order);
        }
        if let Some(limit) = options.limit {
            query.limit(limit);
        }
        if let Some(skip) = options.skip {
            query.offset(skip);
        }

        Ok(self.backend().build(&query))
    }

    fn insert_statement(
        &self,
        entities: &[CatsEntity],
        options: Option<&RepositoryOptions>,
    ) -> Result<Statement, RepositoryError> {
        let mut insert = Query::insert();
        insert.into_table(self.table(options)).columns([
            cats::Column::Id,
            cats::Column::Name,
            cats::Column::Breed,
            cats::Column::Age,
            cats::Column::CreatedAt,
            cats::Column::UpdatedAt,
            cats::Column::DeletedAt,
        ]);

        let now = Utc::now().fixed_offset();
        for entity in entities {
            insert
                .values([
                    entity.id.into(),
                    entity.name.clone().into(),
                    entity.breed.clone().into(),
                    entity.age.into(),
                    entity.created_at.map(|t| t.fixed_offset()).unwrap_or(now).into(),
                    entity.updated_at.map(|t| t.fixed_offset()).unwrap_or(now).into(),
                    entity.deleted_at.map(|t| t.fixed_offset()).into(),
                ])
                .map_err(|e| RepositoryError::Internal(e.to_string()))?;
        }

        Ok(self.backend().build(&insert))
    }

    /// 构建更新语句，`limit_one` 时只更新第一条匹配记录；补丁为空时返回 `None`
    fn update_statement(
        &self,
        filter: &Filter,
        patch: &Value,
        options: &RepositoryOptions,
        limit_one: bool,
    ) -> Result<Option<Statement>, RepositoryError> {
        let object = patch
            .as_object()
            .ok_or_else(|| RepositoryError::InvalidFilter("patch must be an object".to_string()))?;

        let mut values: Vec<(cats::Column, SimpleExpr)> = Vec::with_capacity(object.len());
        for (field, value) in object {
            // Primary key is never rewritten
            if field == "id" {
                continue;
            }
            let column = column(field)?;
            values.push((column, column_value(column, value)?.into()));
        }
        if values.is_empty() {
            return Ok(None);
        }

        let mut update = Query::update();
        update.table(self.table(Some(options))).values(values);

        if limit_one {
            update.cond_where(Expr::col(cats::Column::Id).in_subquery(
                self.first_match(filter, Some(options))?,
            ));
        } else {
            update.cond_where(active_condition(filter)?);
        }

        Ok(Some(self.backend().build(&update)))
    }

    fn first_match(
        &self,
        filter: &Filter,
        options: Option<&RepositoryOptions>,
    ) -> Result<SelectStatement, RepositoryError> {
        let mut query = Query::select();
        query
            .column(cats::Column::Id)
            .from(self.table(options))
            .cond_where(active_condition(filter)?)
            .limit(1);
        Ok(query)
    }

    fn count_statement(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Statement, RepositoryError> {
        let mut query = Query::select();
        query
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("total"))
            .from(self.table(Some(options)))
            .cond_where(active_condition(filter)?);
        Ok(self.backend().build(&query))
    }

    async fn query_all(
        &self,
        stmt: Statement,
        session: Option<&mut SeaOrmSession>,
    ) -> Result<Vec<CatsEntity>, DbErr> {
        let select = cats::Entity::find().from_raw_sql(stmt);
        let models = match session {
            Some(session) => select.all(&session.transaction).await?,
            None => select.all(self.db.as_ref()).await?,
        };
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn execute(
        &self,
        stmt: Statement,
        session: Option<&mut SeaOrmSession>,
    ) -> Result<ExecResult, DbErr> {
        debug!(sql = %stmt.sql, "Executing cats statement");
        match session {
            Some(session) => session.transaction.execute(stmt).await,
            None => self.db.execute(stmt).await,
        }
    }
}

#[async_trait]
impl Repository<CatsEntity> for CatsRepositoryImpl {
    type Session = SeaOrmSession;

    async fn create(
        &self,
        entity: &CatsEntity,
        session: Option<&mut SeaOrmSession>,
    ) -> Result<CreatedModel, RepositoryError> {
        let stmt = self.insert_statement(std::slice::from_ref(entity), None)?;
        let result = self.execute(stmt, session).await?;

        Ok(CreatedModel {
            id: entity.id,
            created: result.rows_affected() > 0,
        })
    }

    async fn insert_many(
        &self,
        entities: &[CatsEntity],
        session: Option<&mut SeaOrmSession>,
    ) -> Result<(), RepositoryError> {
        if entities.is_empty() {
            return Ok(());
        }
        let stmt = self.insert_statement(entities, None)?;
        self.execute(stmt, session).await?;
        Ok(())
    }

    async fn find(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Vec<CatsEntity>, RepositoryError> {
        let stmt = self.select_statement(filter, options)?;
        Ok(self.query_all(stmt, None).await?)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        options: &RepositoryOptions,
    ) -> Result<Option<CatsEntity>, RepositoryError> {
        self.find_one(&Filter::by_id(id), options).await
    }

    async fn find_one(
        &self,
        filter: &Filter,
        options: &RepositoryOptions,
    ) -> Result<Option<CatsEntity>, RepositoryError> {
        let options = RepositoryOptions {
            limit: Some(1),
            ..options.clone()
        };
        let stmt = self.select_statement(filter, &options)?;
        Ok(self.query_all(stmt, None).await?.into_iter().next())
    }

    async fn find_all(&self, filter: &Filter) -> Result<Vec<CatsEntity>, RepositoryError> {
        self.find(filter, &RepositoryOptions::default()).await
    }

    async fn update_one(
        &self,
        filter: &Filter,
        patch: &Value,
        options: &RepositoryOptions,
        session: Option<&mut SeaOrmSession>,
    ) -> Result<UpdatedModel, RepositoryError> {
        let Some(stmt) = self.update_statement(filter, patch, options, true)? else {
            return Ok(updated(0));
        };
        let result = self.execute(stmt, session).await?;
        Ok(updated(result.rows_affected()))
    }

    async fn update_many(
        &self,
        filter: &Filter,
        patch: &Value,
        options: &RepositoryOptions,
        session: Option<&mut SeaOrmSession>,
    ) -> Result<UpdatedModel, RepositoryError> {
        let Some(stmt) = self.update_statement(filter, patch, options, false)? else {
            return Ok(updated(0));
        };
        let result = self.execute(stmt, session).await?;
        Ok(updated(result.rows_affected()))
    }

    async fn remove(&self, filter: &Filter) -> Result<RemovedModel, RepositoryError> {
        let mut delete = Query::delete();
        delete
            .from_table(self.table(None))
            .cond_where(Expr::col(cats::Column::Id).in_subquery(self.first_match(filter, None)?));

        let result = self.execute(self.backend().build(&delete), None).await?;
        Ok(RemovedModel::from_count(result.rows_affected()))
    }

    async fn exists(&self, id: Uuid) -> Result<bool, RepositoryError> {
        let mut query = Query::select();
        query
            .column(cats::Column::Id)
            .from(self.table(None))
            .and_where(Expr::col(cats::Column::Id).eq(id))
            .limit(1);

        let row = self.db.query_one(self.backend().build(&query)).await?;
        Ok(row.is_some())
    }

    async fn start_session(&self) -> Result<SeaOrmSession, RepositoryError> {
        let transaction = self.db.begin().await?;
        Ok(SeaOrmSession { transaction })
    }
}

#[async_trait]
impl CatsRepository for CatsRepositoryImpl {
    async fn paginate(
        &self,
        query: &PaginateQuery,
    ) -> Result<PaginatedResult<CatsEntity>, RepositoryError> {
        let options = query.options();

        let total = match self
            .db
            .query_one(self.count_statement(&query.filter, &options)?)
            .await?
        {
            Some(row) => row.try_get::<i64>("", "total")?,
            None => 0,
        };

        let docs = self
            .query_all(self.select_statement(&query.filter, &options)?, None)
            .await?;

        Ok(PaginatedResult {
            docs,
            page: query.page,
            limit: query.limit,
            total: total.max(0) as u64,
        })
    }
}

impl From<cats::Model> for CatsEntity {
    fn from(model: cats::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            breed: model.breed,
            age: model.age,
            created_at: Some(model.created_at.with_timezone(&Utc)),
            updated_at: Some(model.updated_at.with_timezone(&Utc)),
            deleted_at: model.deleted_at.map(|t| t.with_timezone(&Utc)),
        }
    }
}

fn updated(rows: u64) -> UpdatedModel {
    UpdatedModel {
        matched_count: rows,
        modified_count: rows,
        acknowledged: true,
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// 字段名到列的映射
fn column(field: &str) -> Result<cats::Column, RepositoryError> {
    match field {
        "id" => Ok(cats::Column::Id),
        "name" => Ok(cats::Column::Name),
        "breed" => Ok(cats::Column::Breed),
        "age" => Ok(cats::Column::Age),
        "createdAt" => Ok(cats::Column::CreatedAt),
        "updatedAt" => Ok(cats::Column::UpdatedAt),
        "deletedAt" => Ok(cats::Column::DeletedAt),
        other => Err(RepositoryError::InvalidFilter(format!(
            "unknown field `{other}`"
        ))),
    }
}

fn column_value(column: cats::Column, value: &Value) -> Result<SeaValue, RepositoryError> {
    let invalid =
        || RepositoryError::InvalidFilter(format!("invalid value `{value}` for {column:?}"));

    let converted: SeaValue = match column {
        cats::Column::Id => {
            let raw = value.as_str().ok_or_else(invalid)?;
            Uuid::parse_str(raw).map_err(|_| invalid())?.into()
        }
        cats::Column::Name | cats::Column::Breed => {
            value.as_str().ok_or_else(invalid)?.to_string().into()
        }
        cats::Column::Age => {
            let age = value.as_i64().ok_or_else(invalid)?;
            i32::try_from(age).map_err(|_| invalid())?.into()
        }
        cats::Column::CreatedAt | cats::Column::UpdatedAt | cats::Column::DeletedAt => {
            match value {
                Value::Null => None::<DateTime<FixedOffset>>.into(),
                Value::String(raw) => DateTime::parse_from_rfc3339(raw)
                    .map_err(|_| invalid())?
                    .into(),
                _ => return Err(invalid()),
            }
        }
    };
    Ok(converted)
}

/// 将过滤条件翻译为 SQL 条件，并始终排除已软删除的记录
fn active_condition(filter: &Filter) -> Result<Condition, RepositoryError> {
    let mut condition = Condition::all().add(Expr::col(cats::Column::DeletedAt).is_null());

    for item in filter.conditions() {
        let column = column(&item.field)?;
        let expr = match item.operator {
            FilterOperator::Eq if item.value.is_null() => Expr::col(column).is_null(),
            FilterOperator::Eq => Expr::col(column).eq(column_value(column, &item.value)?),
            FilterOperator::Like => {
                let text = item.value.as_str().ok_or_else(|| {
                    RepositoryError::InvalidFilter(format!("like on `{}` needs text", item.field))
                })?;
                Expr::col(column).ilike(format!("%{}%", escape_like(text)))
            }
            FilterOperator::In => {
                let values = item
                    .value
                    .as_array()
                    .ok_or_else(|| {
                        RepositoryError::InvalidFilter(format!(
                            "in on `{}` needs a list",
                            item.field
                        ))
                    })?
                    .iter()
                    .map(|v| column_value(column, v))
                    .collect::<Result<Vec<_>, _>>()?;
                Expr::col(column).is_in(values)
            }
            FilterOperator::IsNull => Expr::col(column).is_null(),
        };
        condition = condition.add(expr);
    }

    Ok(condition)
}

fn escape_like(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
