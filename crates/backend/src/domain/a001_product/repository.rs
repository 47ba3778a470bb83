use chrono::Utc;
use contracts::domain::a001_product::aggregate::{Product, ProductId};
use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, LikeExpr};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::data::db::get_connection;
use crate::shared::paging::{build_search_text, search_pattern, PageWindow};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_product")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub code: String,
    pub description: String,
    pub article: String,
    pub search_text: String,
    pub is_deleted: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        let uuid = Uuid::parse_str(&m.id).unwrap_or_else(|_| Uuid::nil());
        Product {
            id: ProductId(uuid),
            code: m.code,
            description: m.description,
            article: m.article,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    get_connection()
}

/// Страница товаров для селектора: (элементы, всего найдено)
pub async fn search_page(window: &PageWindow) -> anyhow::Result<(Vec<Product>, u64)> {
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

pub async fn get_by_id(id: Uuid) -> anyhow::Result<Option<Product>> {
    let result = Entity::find_by_id(id.to_string())
        .filter(Column::IsDeleted.eq(false))
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn count_all() -> anyhow::Result<u64> {
    Ok(Entity::find().count(conn()).await?)
}

pub async fn insert(product: &Product) -> anyhow::Result<Uuid> {
    let uuid = product.id.value();
    let active = ActiveModel {
        id: Set(uuid.to_string()),
        code: Set(product.code.clone()),
        description: Set(product.description.clone()),
        article: Set(product.article.clone()),
        search_text: Set(build_search_text(&[
            &product.code,
            &product.description,
            &product.article,
        ])),
        is_deleted: Set(false),
        created_at: Set(Some(Utc::now())),
    };
    active.insert(conn()).await?;
    Ok(uuid)
}

/// Все товары (для сводки остатков)
pub async fn list_all() -> anyhow::Result<Vec<Product>> {
    let items = Entity::find()
        .filter(Column::IsDeleted.eq(false))
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();
    Ok(items)
}
