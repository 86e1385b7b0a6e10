use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};

use crate::domain::a001_collection_point::repository::point_item;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "a002_recycling_item")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    /// Имя файла в каталоге uploads
    pub image: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub async fn list_all(db: &DatabaseConnection) -> anyhow::Result<Vec<Model>> {
    Ok(Entity::find().order_by_asc(Column::Id).all(db).await?)
}

pub async fn count(db: &DatabaseConnection) -> anyhow::Result<u64> {
    Ok(Entity::find().count(db).await?)
}

pub async fn insert(db: &DatabaseConnection, title: &str, image: &str) -> anyhow::Result<i64> {
    let active = ActiveModel {
        title: Set(title.to_string()),
        image: Set(image.to_string()),
        ..Default::default()
    };
    let model = active.insert(db).await?;
    Ok(model.id)
}

/// Those of `ids` that exist in the catalog
pub async fn existing_ids(db: &DatabaseConnection, ids: &[i64]) -> anyhow::Result<Vec<i64>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let found = Entity::find()
        .filter(Column::Id.is_in(ids.iter().copied()))
        .all(db)
        .await?;
    Ok(found.into_iter().map(|m| m.id).collect())
}

/// Категории, которые принимает пункт
pub async fn list_by_point(db: &DatabaseConnection, point_id: i64) -> anyhow::Result<Vec<Model>> {
    let item_ids: Vec<i64> = point_item::Entity::find()
        .filter(point_item::Column::PointId.eq(point_id))
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.item_id)
        .collect();

    if item_ids.is_empty() {
        return Ok(Vec::new());
    }

    Ok(Entity::find()
        .filter(Column::Id.is_in(item_ids))
        .order_by_asc(Column::Id)
        .all(db)
        .await?)
}
