use async_trait::async_trait;
use sea_orm::DbErr;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ItemError, ItemResult};
use crate::models::{Item, NewItem};

/// Persistence for items
///
/// Implementations must enforce title-key uniqueness atomically with the
/// insert and report a violation as [`ItemError::DuplicateTitle`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Store a new item, assigning its id
    async fn insert(&self, item: NewItem) -> ItemResult<Item>;

    /// All items, ordered by id
    async fn find_all(&self) -> ItemResult<Vec<Item>>;

    async fn find_by_id(&self, id: i32) -> ItemResult<Option<Item>>;

    /// Exact match on the stored title
    async fn find_by_title(&self, title: &str) -> ItemResult<Option<Item>>;

    /// Remove every item. Test setup only; ids keep counting up afterwards.
    async fn clear(&self) -> ItemResult<()>;
}

#[derive(Default)]
struct Store {
    last_id: i32,
    items: BTreeMap<i32, Item>,
    keys: HashMap<String, i32>,
}

/// In-memory repository for development and router tests
#[derive(Clone, Default)]
pub struct InMemoryItemRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn insert(&self, item: NewItem) -> ItemResult<Item> {
        let mut store = self.store.write().await;

        if store.keys.contains_key(&item.title_key) {
            return Err(ItemError::DuplicateTitle(item.title));
        }

        store.last_id = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| DbErr::Custom("item id sequence exhausted".to_string()))?;
        let id = store.last_id;

        let stored = Item {
            id,
            title: item.title,
            url: item.url,
            description: item.description,
            amount: item.amount,
        };
        store.keys.insert(item.title_key, id);
        store.items.insert(id, stored.clone());

        Ok(stored)
    }

    async fn find_all(&self) -> ItemResult<Vec<Item>> {
        let store = self.store.read().await;
        Ok(store.items.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> ItemResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(store.items.get(&id).cloned())
    }

    async fn find_by_title(&self, title: &str) -> ItemResult<Option<Item>> {
        let store = self.store.read().await;
        Ok(store.items.values().find(|item| item.title == title).cloned())
    }

    async fn clear(&self) -> ItemResult<()> {
        let mut store = self.store.write().await;
        store.items.clear();
        store.keys.clear();
        Ok(())
    }
}
