use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, Set};
use serde::{Deserialize, Serialize};

use crate::shared::data::db::get_connection;

/// Остаток варианта товара в магазине
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a003_stock_balance")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: String,
    pub variant_id: String,
    pub variant_name: String,
    pub store_id: String,
    pub quantity: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Структура для передачи данных в insert
#[derive(Debug, Clone)]
pub struct BalanceEntry {
    pub product_id: String,
    pub variant_id: String,
    pub variant_name: String,
    pub store_id: String,
    pub quantity: f64,
}

pub async fn list_all() -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find().all(get_connection()).await?)
}

pub async fn insert(entry: &BalanceEntry) -> anyhow::Result<()> {
    let active = ActiveModel {
        id: Set(uuid::Uuid::new_v4().to_string()),
        product_id: Set(entry.product_id.clone()),
        variant_id: Set(entry.variant_id.clone()),
        variant_name: Set(entry.variant_name.clone()),
        store_id: Set(entry.store_id.clone()),
        quantity: Set(entry.quantity),
    };
    active.insert(get_connection()).await?;
    Ok(())
}
