use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "a001_collection_point")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Связь пункт ↔ категория (many-to-many)
pub mod point_item {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
    #[sea_orm(table_name = "a001_collection_point_item")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,
        pub point_id: i64,
        pub item_id: i64,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

/// Данные для вставки нового пункта
#[derive(Debug, Clone)]
pub struct NewPoint {
    pub image: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
}

/// Insert the point and its item links in one transaction.
pub async fn insert_with_items(
    db: &DatabaseConnection,
    point: NewPoint,
    item_ids: &[i64],
) -> anyhow::Result<i64> {
    let txn = db.begin().await?;

    let active = ActiveModel {
        image: Set(point.image),
        name: Set(point.name),
        email: Set(point.email),
        whatsapp: Set(point.whatsapp),
        latitude: Set(point.latitude),
        longitude: Set(point.longitude),
        city: Set(point.city),
        uf: Set(point.uf),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    let inserted = active.insert(&txn).await?;

    for item_id in item_ids {
        point_item::ActiveModel {
            point_id: Set(inserted.id),
            item_id: Set(*item_id),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(inserted.id)
}

pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> anyhow::Result<Option<Model>> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Пункты по городу/штату, принимающие хотя бы одну из категорий `item_ids`.
///
/// Empty `item_ids` means no item restriction.
pub async fn list_filtered(
    db: &DatabaseConnection,
    city: Option<&str>,
    uf: Option<&str>,
    item_ids: &[i64],
) -> anyhow::Result<Vec<Model>> {
    let mut query = Entity::find();

    if let Some(city) = city {
        query = query.filter(Column::City.eq(city));
    }
    if let Some(uf) = uf {
        query = query.filter(Column::Uf.eq(uf));
    }
    if !item_ids.is_empty() {
        let mut point_ids: Vec<i64> = point_item::Entity::find()
            .filter(point_item::Column::ItemId.is_in(item_ids.iter().copied()))
            .all(db)
            .await?
            .into_iter()
            .map(|link| link.point_id)
            .collect();
        point_ids.sort_unstable();
        point_ids.dedup();

        if point_ids.is_empty() {
            return Ok(Vec::new());
        }
        query = query.filter(Column::Id.is_in(point_ids));
    }

    Ok(query.order_by_asc(Column::Id).all(db).await?)
}
