use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

use crate::models::{Item, NewItem};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(unique)]
    pub title_key: String,
    #[sea_orm(column_type = "Text")]
    pub url: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub amount: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Item {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            url: model.url,
            description: model.description,
            amount: model.amount,
        }
    }
}

impl From<NewItem> for ActiveModel {
    fn from(item: NewItem) -> Self {
        Self {
            id: NotSet,
            title: Set(item.title),
            title_key: Set(item.title_key),
            url: Set(item.url),
            description: Set(item.description),
            amount: Set(item.amount),
        }
    }
}
