use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, SqlErr,
};
use tracing::{info, instrument, warn};

use crate::entity;
use crate::error::{ItemError, ItemResult};
use crate::models::{Item, NewItem};
use crate::repository::ItemRepository;

/// PostgreSQL implementation of ItemRepository
///
/// Uniqueness comes from the unique index on `items.title_key`.
#[derive(Clone)]
pub struct PgItemRepository {
    db: DatabaseConnection,
}

impl PgItemRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

const UNIQUE_VIOLATION: &str = "23505";

/// True when `err` reports SQLSTATE 23505 (unique_violation).
///
/// Drivers do not always expose a structured code, so the message is checked
/// as well.
fn is_unique_violation(err: &DbErr) -> bool {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        return true;
    }

    let msg = err.to_string();
    mentions_sqlstate(&msg, UNIQUE_VIOLATION)
        || msg.contains("duplicate key value violates unique constraint")
}

/// `code` directly after a `SQLSTATE` label, as in `SQLSTATE(23505)` or
/// `sqlstate: 23505`. A bare number elsewhere in the text does not count.
fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    let lower = msg.to_ascii_lowercase();
    lower.match_indices("sqlstate").any(|(at, label)| {
        lower[at + label.len()..]
            .trim_start_matches([' ', '(', ':', '='])
            .starts_with(code)
    })
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    #[instrument(skip(self, item), fields(title = %item.title))]
    async fn insert(&self, item: NewItem) -> ItemResult<Item> {
        let title = item.title.clone();

        let model = entity::ActiveModel::from(item)
            .insert(&self.db)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    warn!("Title already taken");
                    ItemError::DuplicateTitle(title)
                } else {
                    ItemError::Database(e)
                }
            })?;

        info!(item_id = model.id, "Item inserted");
        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(model.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn find_by_title(&self, title: &str) -> ItemResult<Option<Item>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Title.eq(title))
            .one(&self.db)
            .await
            .map_err(ItemError::from)?;

        Ok(model.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> ItemResult<()> {
        // No RESTART IDENTITY: ids are never handed out twice
        self.db
            .execute_unprepared("TRUNCATE TABLE items")
            .await
            .map_err(ItemError::from)?;

        warn!("All items removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::AppError;
    use sea_orm::{ConnAcquireErr, DatabaseBackend, MockDatabase, RuntimeErr};

    fn model(id: i32, title: &str) -> entity::Model {
        entity::Model {
            id,
            title: title.to_string(),
            title_key: title.to_string(),
            url: "https://x.test".to_string(),
            description: "A lamp".to_string(),
            amount: 10,
        }
    }

    fn new_item(title: &str) -> NewItem {
        NewItem {
            title: title.to_string(),
            title_key: title.to_string(),
            url: "https://x.test".to_string(),
            description: "A lamp".to_string(),
            amount: 10,
        }
    }

    fn query_error(msg: &str) -> DbErr {
        DbErr::Query(RuntimeErr::Internal(msg.to_string()))
    }

    #[test]
    fn test_unique_violation_detection() {
        assert!(is_unique_violation(&query_error(
            "duplicate key value violates unique constraint \"idx_items_title_key\""
        )));
        assert!(is_unique_violation(&DbErr::Custom("SQLSTATE(23505)".into())));
        assert!(!is_unique_violation(&query_error("relation \"items\" does not exist")));
        assert!(!is_unique_violation(&DbErr::RecordNotFound("items".into())));
    }

    #[test]
    fn test_bare_code_in_message_is_not_a_unique_violation() {
        assert!(!is_unique_violation(&DbErr::Conn(RuntimeErr::Internal(
            "connection refused: 10.0.0.5:23505".into()
        ))));
        assert!(!is_unique_violation(&query_error("SQLSTATE(23503)")));
        assert!(is_unique_violation(&query_error(
            "error returned from database: sqlstate: 23505"
        )));
    }

    #[tokio::test]
    async fn test_insert_keeps_connection_failures_distinct() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::ConnectionAcquire(ConnAcquireErr::Timeout)])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let err = repo.insert(new_item("Lamp")).await.unwrap_err();
        assert!(matches!(
            err,
            ItemError::Database(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout))
        ));
        assert_eq!(AppError::from(err).status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_insert_maps_unique_violation_to_duplicate_title() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([query_error(
                "duplicate key value violates unique constraint \"idx_items_title_key\"",
            )])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let err = repo.insert(new_item("Lamp")).await.unwrap_err();
        assert!(matches!(err, ItemError::DuplicateTitle(ref t) if t == "Lamp"));
    }

    #[tokio::test]
    async fn test_insert_maps_other_failures_to_database_error() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([query_error("connection reset by peer")])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let err = repo.insert(new_item("Lamp")).await.unwrap_err();
        assert!(matches!(err, ItemError::Database(_)));
    }

    #[tokio::test]
    async fn test_insert_returns_stored_row() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(7, "Lamp")]])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let item = repo.insert(new_item("Lamp")).await.unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.title, "Lamp");
    }

    #[tokio::test]
    async fn test_find_by_id_missing_is_none() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgItemRepository::new(db);

        assert_eq!(repo.find_by_id(9999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_find_all_maps_models() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Lamp"), model(2, "Desk")]])
            .into_connection();
        let repo = PgItemRepository::new(db);

        let items = repo.find_all().await.unwrap();
        let ids: Vec<i32> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
