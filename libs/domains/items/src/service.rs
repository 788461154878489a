//! Item Service - validation, policy, and error mapping over a repository

use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::error::{ItemError, ItemResult};
use crate::models::{CreateItem, Item};
use crate::policy::ItemPolicy;
use crate::repository::ItemRepository;

/// Create, list and fetch items.
///
/// The repository is passed in explicitly; the service keeps no state of its
/// own between calls.
pub struct ItemService<R: ItemRepository> {
    repository: Arc<R>,
    policy: ItemPolicy,
}

impl<R: ItemRepository> ItemService<R> {
    /// Service with the default [`ItemPolicy`]
    pub fn new(repository: R) -> Self {
        Self::with_policy(repository, ItemPolicy::default())
    }

    pub fn with_policy(repository: R, policy: ItemPolicy) -> Self {
        Self {
            repository: Arc::new(repository),
            policy,
        }
    }

    /// Validate and store a new item.
    ///
    /// Title uniqueness is left to the repository so that concurrent creates
    /// cannot both succeed.
    #[instrument(skip(self, input), fields(title = %input.title))]
    pub async fn create_item(&self, input: CreateItem) -> ItemResult<Item> {
        input.validate()?;
        let new_item = self.policy.prepare(input)?;

        match self.repository.insert(new_item).await {
            Ok(item) => {
                info!(item_id = item.id, "Item created");
                Ok(item)
            }
            Err(err @ ItemError::DuplicateTitle(_)) => {
                warn!("Rejected duplicate title");
                Err(err)
            }
            Err(err) => Err(err),
        }
    }

    /// Every item, ordered by id. Empty when nothing is stored.
    #[instrument(skip(self))]
    pub async fn list_items(&self) -> ItemResult<Vec<Item>> {
        self.repository.find_all().await
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, id: i32) -> ItemResult<Item> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(ItemError::NotFound(id))
    }
}

impl<R: ItemRepository> Clone for ItemService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            policy: self.policy,
        }
    }
}
