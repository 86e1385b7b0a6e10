use super::repository::{self, NewPoint};
use crate::domain::a002_recycling_item;
use crate::shared::config::upload_url;
use contracts::domain::a001_collection_point::aggregate::{
    CollectionPoint, CollectionPointId, CreatePointDto, PointDetailsResponse, PointFieldError,
    PointFilter,
};
use sea_orm::DatabaseConnection;

/// Изображение, которое получает каждый новый пункт
pub const PLACEHOLDER_IMAGE: &str = "point-placeholder.svg";

#[derive(Debug, thiserror::Error)]
pub enum PointServiceError {
    #[error("validation failed: {0:?}")]
    Validation(Vec<PointFieldError>),
    #[error("unknown recycling items: {0:?}")]
    UnknownItems(Vec<i64>),
    #[error("bad filter: {0}")]
    BadFilter(String),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

fn to_aggregate(model: repository::Model, public_url: &str) -> CollectionPoint {
    CollectionPoint {
        id: CollectionPointId(model.id),
        image_url: upload_url(public_url, &model.image),
        name: model.name,
        email: model.email,
        whatsapp: model.whatsapp,
        latitude: model.latitude,
        longitude: model.longitude,
        city: model.city,
        uf: model.uf,
        created_at: model.created_at,
    }
}

/// Создать пункт сбора вместе со связями на категории
pub async fn create(
    db: &DatabaseConnection,
    dto: CreatePointDto,
) -> Result<CollectionPointId, PointServiceError> {
    dto.validate().map_err(PointServiceError::Validation)?;

    let item_ids: Vec<i64> = dto.items.iter().map(|id| id.value()).collect();
    let existing = a002_recycling_item::repository::existing_ids(db, &item_ids).await?;
    let unknown: Vec<i64> = item_ids
        .iter()
        .copied()
        .filter(|id| !existing.contains(id))
        .collect();
    if !unknown.is_empty() {
        return Err(PointServiceError::UnknownItems(unknown));
    }

    let point = NewPoint {
        image: PLACEHOLDER_IMAGE.to_string(),
        name: dto.name.trim().to_string(),
        email: dto.email.trim().to_string(),
        whatsapp: dto.whatsapp.trim().to_string(),
        latitude: dto.latitude,
        longitude: dto.longitude,
        city: dto.city.trim().to_string(),
        uf: dto.uf.trim().to_uppercase(),
    };

    let id = repository::insert_with_items(db, point, &item_ids).await?;
    tracing::info!("Created collection point {} with {} items", id, item_ids.len());
    Ok(CollectionPointId(id))
}

/// Пункт и принимаемые им категории; `None` если пункта нет
pub async fn get_details(
    db: &DatabaseConnection,
    id: CollectionPointId,
    public_url: &str,
) -> Result<Option<PointDetailsResponse>, PointServiceError> {
    let Some(model) = repository::get_by_id(db, id.value()).await? else {
        return Ok(None);
    };

    let items = a002_recycling_item::repository::list_by_point(db, model.id)
        .await?
        .into_iter()
        .map(|m| a002_recycling_item::service::to_aggregate(m, public_url))
        .collect();

    Ok(Some(PointDetailsResponse {
        point: to_aggregate(model, public_url),
        items,
    }))
}

pub async fn list(
    db: &DatabaseConnection,
    filter: PointFilter,
    public_url: &str,
) -> Result<Vec<CollectionPoint>, PointServiceError> {
    let item_ids: Vec<i64> = filter
        .item_ids()
        .map_err(PointServiceError::BadFilter)?
        .into_iter()
        .map(|id| id.value())
        .collect();

    let city = filter.city.as_deref().map(str::trim).filter(|s| !s.is_empty());
    let uf = filter
        .uf
        .as_deref()
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty());

    let models = repository::list_filtered(db, city, uf.as_deref(), &item_ids).await?;
    Ok(models
        .into_iter()
        .map(|m| to_aggregate(m, public_url))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::fresh_connection;
    use contracts::domain::a002_recycling_item::aggregate::RecyclingItemId;

    const URL: &str = "http://localhost:3000";

    fn dto(city: &str, uf: &str, items: &[i64]) -> CreatePointDto {
        CreatePointDto {
            name: "  Mercado Bom Preço ".into(),
            email: "contato@bompreco.com.br".into(),
            whatsapp: "11999990000".into(),
            uf: uf.into(),
            city: city.into(),
            latitude: -22.9,
            longitude: -47.06,
            items: items.iter().copied().map(RecyclingItemId).collect(),
        }
    }

    async fn seeded() -> DatabaseConnection {
        let db = fresh_connection().await;
        a002_recycling_item::service::seed_defaults(&db).await.unwrap();
        db
    }

    #[tokio::test]
    async fn create_then_fetch_details() {
        let db = seeded().await;

        let id = create(&db, dto("Campinas", "sp", &[1, 3])).await.unwrap();
        let details = get_details(&db, id, URL).await.unwrap().unwrap();

        assert_eq!(details.point.id, id);
        assert_eq!(details.point.name, "Mercado Bom Preço");
        assert_eq!(details.point.uf, "SP");
        assert_eq!(
            details.point.image_url,
            "http://localhost:3000/uploads/point-placeholder.svg"
        );
        let ids: Vec<i64> = details.items.iter().map(|i| i.id.0).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn invalid_payload_is_not_stored() {
        let db = seeded().await;

        let err = create(&db, dto("0", "0", &[])).await.unwrap_err();
        match err {
            PointServiceError::Validation(fields) => {
                assert!(fields.contains(&PointFieldError::UfRequired));
                assert!(fields.contains(&PointFieldError::CityRequired));
                assert!(fields.contains(&PointFieldError::ItemsRequired));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(list(&db, PointFilter::default(), URL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_items_are_rejected() {
        let db = seeded().await;

        let err = create(&db, dto("Campinas", "SP", &[1, 99])).await.unwrap_err();
        assert!(matches!(err, PointServiceError::UnknownItems(ref ids) if ids == &vec![99]));
    }

    #[tokio::test]
    async fn missing_point_yields_none() {
        let db = seeded().await;
        assert!(get_details(&db, CollectionPointId(42), URL).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_region_and_items() {
        let db = seeded().await;
        let campinas = create(&db, dto("Campinas", "SP", &[1, 2])).await.unwrap();
        let santos = create(&db, dto("Santos", "SP", &[4])).await.unwrap();
        create(&db, dto("Rio de Janeiro", "RJ", &[1])).await.unwrap();

        let filter = PointFilter {
            uf: Some("sp".into()),
            ..Default::default()
        };
        let ids: Vec<_> = list(&db, filter, URL).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![campinas, santos]);

        let filter = PointFilter {
            city: Some("Campinas".into()),
            uf: Some("SP".into()),
            items: Some("2,4".into()),
        };
        let ids: Vec<_> = list(&db, filter, URL).await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![campinas]);

        let filter = PointFilter {
            items: Some("5".into()),
            ..Default::default()
        };
        assert!(list(&db, filter, URL).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn malformed_item_filter_is_reported() {
        let db = seeded().await;
        let filter = PointFilter {
            items: Some("1,abc".into()),
            ..Default::default()
        };
        assert!(matches!(
            list(&db, filter, URL).await,
            Err(PointServiceError::BadFilter(_))
        ));
    }
}
