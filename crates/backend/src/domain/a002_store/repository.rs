use chrono::Utc;
use contracts::domain::a002_store::aggregate::{Store, StoreId};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::paging::{build_search_text, search_pattern, PageWindow};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_store")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub city: String,
    pub search_text: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Store {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::nil());
        Store {
            id: StoreId(uuid),
            code: m.code,
            description: m.description,
            city: m.city,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

pub async fn search_page(window: &PageWindow) -> anyhow::Result<(Vec<Store>, u64)> {
    let mut query = Entity::find().filter(Column::IsDeleted.eq(false));

    if let Some(search) = &window.search {
        let pattern = LikeExpr::new(search_pattern(search)).escape('\\');
        query = query.filter(Expr::col((Entity, Column::SearchText)).like(pattern));
    }

    let total = query.clone().count(conn()).await?;

    let items = query
        .order_by_asc(Column::Description)
        .order_by_asc(Column::Id)
        .limit(window.limit())
        .offset(window.offset())
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok((items, total))
}

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Store>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Все магазины (для сводки остатков)
pub async fn list_all() -> anyhow::Result<Vec<Store>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}

pub async fn insert(store: &Store) -> anyhow::Result<Uuid> {
    let uuid = store.id.0;
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(store.code.clone()),
        description: Set(store.description.clone()),
        city: Set(store.city.clone()),
        search_text: Set(build_search_text(&[&store.code, &store.description, &store.city])),
        is_deleted: Set(false),
        created_at: Set(Some(Utc::now())),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}
