use super::repository;
use crate::shared::config::upload_url;
use contracts::domain::a002_recycling_item::aggregate::RecyclingItem;
use sea_orm::DatabaseConnection;

/// Категории по умолчанию: (название, файл иконки)
pub const DEFAULT_ITEMS: &[(&str, &str)] = &[
    ("Lâmpadas", "lampadas.svg"),
    ("Pilhas e Baterias", "baterias.svg"),
    ("Papéis e Papelão", "papeis-papelao.svg"),
    ("Resíduos Eletrônicos", "eletronicos.svg"),
    ("Resíduos Orgânicos", "organicos.svg"),
    ("Óleo de Cozinha", "oleo.svg"),
];

pub fn to_aggregate(model: repository::Model, public_url: &str) -> RecyclingItem {
    RecyclingItem::new(model.id, model.title, upload_url(public_url, &model.image))
}

/// Каталог категорий, упорядоченный по id
pub async fn list_all(db: &DatabaseConnection, public_url: &str) -> anyhow::Result<Vec<RecyclingItem>> {
    Ok(repository::list_all(db)
        .await?
        .into_iter()
        .map(|m| to_aggregate(m, public_url))
        .collect())
}

/// Заполнить пустой каталог категориями по умолчанию
pub async fn seed_defaults(db: &DatabaseConnection) -> anyhow::Result<usize> {
    if repository::count(db).await? > 0 {
        return Ok(0);
    }
    for (title, image) in DEFAULT_ITEMS {
        repository::insert(db, title, image).await?;
    }
    tracing::info!("Seeded {} recycling items", DEFAULT_ITEMS.len());
    Ok(DEFAULT_ITEMS.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::test_support::fresh_connection;

    #[tokio::test]
    async fn seed_is_applied_once() {
        let db = fresh_connection().await;

        assert_eq!(seed_defaults(&db).await.unwrap(), DEFAULT_ITEMS.len());
        assert_eq!(seed_defaults(&db).await.unwrap(), 0);

        let items = list_all(&db, "http://localhost:3000").await.unwrap();
        assert_eq!(items.len(), DEFAULT_ITEMS.len());
        assert_eq!(items[0].title, "Lâmpadas");
        assert_eq!(items[0].image_url, "http://localhost:3000/uploads/lampadas.svg");
        assert!(items.windows(2).all(|w| w[0].id < w[1].id));
    }
}
