use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::domain::a002_recycling_item::aggregate::{RecyclingItem, RecyclingItemId};
use crate::domain::common::AggregateId;

// ============================================================================
// ID Type
// ============================================================================

/// Идентификатор пункта сбора (автоинкремент в БД)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionPointId(pub i64);

impl CollectionPointId {
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl AggregateId for CollectionPointId {
    fn from_string(s: &str) -> Result<Self, String> {
        i64::from_string(s).map(CollectionPointId)
    }
}

// ============================================================================
// Aggregate
// ============================================================================

/// Пункт сбора перерабатываемых материалов
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionPoint {
    pub id: CollectionPointId,
    pub image_url: String,
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub uf: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// ============================================================================
// Forms / DTOs
// ============================================================================

/// Тело запроса POST /api/points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePointDto {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub uf: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub items: Vec<RecyclingItemId>,
}

/// Ошибка валидации конкретного поля формы
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointFieldError {
    NameRequired,
    EmailRequired,
    EmailInvalid,
    WhatsappRequired,
    UfRequired,
    CityRequired,
    PositionRequired,
    PositionOutOfRange,
    ItemsRequired,
    ItemsDuplicated,
}

impl PointFieldError {
    /// Имя поля в теле запроса
    pub fn field(&self) -> &'static str {
        match self {
            Self::NameRequired => "name",
            Self::EmailRequired | Self::EmailInvalid => "email",
            Self::WhatsappRequired => "whatsapp",
            Self::UfRequired => "uf",
            Self::CityRequired => "city",
            Self::PositionRequired | Self::PositionOutOfRange => "position",
            Self::ItemsRequired | Self::ItemsDuplicated => "items",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::NameRequired => "Informe o nome da entidade",
            Self::EmailRequired => "Informe o e-mail",
            Self::EmailInvalid => "E-mail inválido",
            Self::WhatsappRequired => "Informe o Whatsapp",
            Self::UfRequired => "Selecione uma UF",
            Self::CityRequired => "Selecione uma cidade",
            Self::PositionRequired => "Selecione o endereço no mapa",
            Self::PositionOutOfRange => "Coordenadas fora do intervalo válido",
            Self::ItemsRequired => "Selecione ao menos um item de coleta",
            Self::ItemsDuplicated => "Itens de coleta repetidos",
        }
    }
}

impl fmt::Display for PointFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Placeholder values the region selects start with.
pub const UF_PLACEHOLDER: &str = "0";
pub const CITY_PLACEHOLDER: &str = "0";

impl CreatePointDto {
    /// Валидация данных перед записью.
    ///
    /// Collects every failing field instead of stopping at the first one so the
    /// form can highlight all of them at once.
    pub fn validate(&self) -> Result<(), Vec<PointFieldError>> {
        let mut errors = Vec::new();

        if self.name.trim().is_empty() {
            errors.push(PointFieldError::NameRequired);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(PointFieldError::EmailRequired);
        } else if !is_plausible_email(email) {
            errors.push(PointFieldError::EmailInvalid);
        }

        if self.whatsapp.trim().is_empty() {
            errors.push(PointFieldError::WhatsappRequired);
        }

        let uf = self.uf.trim();
        if uf == UF_PLACEHOLDER || uf.chars().count() != 2 || !uf.chars().all(|c| c.is_ascii_alphabetic()) {
            errors.push(PointFieldError::UfRequired);
        }

        let city = self.city.trim();
        if city.is_empty() || city == CITY_PLACEHOLDER {
            errors.push(PointFieldError::CityRequired);
        }

        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            errors.push(PointFieldError::PositionRequired);
        } else if self.latitude == 0.0 && self.longitude == 0.0 {
            errors.push(PointFieldError::PositionRequired);
        } else if !(-90.0..=90.0).contains(&self.latitude)
            || !(-180.0..=180.0).contains(&self.longitude)
        {
            errors.push(PointFieldError::PositionOutOfRange);
        }

        if self.items.is_empty() {
            errors.push(PointFieldError::ItemsRequired);
        } else {
            let unique: HashSet<_> = self.items.iter().collect();
            if unique.len() != self.items.len() {
                errors.push(PointFieldError::ItemsDuplicated);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Ответ на успешное создание пункта
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePointResponse {
    pub id: CollectionPointId,
}

/// Ответ GET /api/points/:id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointDetailsResponse {
    pub point: CollectionPoint,
    pub items: Vec<RecyclingItem>,
}

/// Ошибка поля в ответе API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldErrorDto {
    pub field: String,
    pub message: String,
}

impl From<PointFieldError> for FieldErrorDto {
    fn from(e: PointFieldError) -> Self {
        Self {
            field: e.field().to_string(),
            message: e.message().to_string(),
        }
    }
}

/// Тело ответа с ошибкой (4xx/5xx)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default)]
    pub fields: Vec<FieldErrorDto>,
}

/// Параметры GET /api/points?city=&uf=&items=1,2
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PointFilter {
    pub city: Option<String>,
    pub uf: Option<String>,
    pub items: Option<String>,
}

impl PointFilter {
    /// Разобрать список id категорий из строки вида "1,2, 3"
    pub fn item_ids(&self) -> Result<Vec<RecyclingItemId>, String> {
        let Some(raw) = self.items.as_deref() else {
            return Ok(Vec::new());
        };
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(RecyclingItemId::from_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_dto() -> CreatePointDto {
        CreatePointDto {
            name: "Mercado Bom Preço".into(),
            email: "contato@bompreco.com.br".into(),
            whatsapp: "11999990000".into(),
            uf: "SP".into(),
            city: "Campinas".into(),
            latitude: -23.5,
            longitude: -46.6,
            items: vec![RecyclingItemId(1), RecyclingItemId(2)],
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert_eq!(valid_dto().validate(), Ok(()));
    }

    #[test]
    fn empty_name_is_rejected() {
        let dto = CreatePointDto {
            name: "   ".into(),
            ..valid_dto()
        };
        assert_eq!(dto.validate(), Err(vec![PointFieldError::NameRequired]));
    }

    #[test]
    fn placeholders_and_default_position_are_rejected() {
        let dto = CreatePointDto {
            uf: UF_PLACEHOLDER.into(),
            city: CITY_PLACEHOLDER.into(),
            latitude: 0.0,
            longitude: 0.0,
            items: vec![],
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                PointFieldError::UfRequired,
                PointFieldError::CityRequired,
                PointFieldError::PositionRequired,
                PointFieldError::ItemsRequired,
            ]
        );
    }

    #[test]
    fn duplicated_items_and_bad_email_are_rejected() {
        let dto = CreatePointDto {
            email: "not-an-email".into(),
            items: vec![RecyclingItemId(3), RecyclingItemId(3)],
            ..valid_dto()
        };
        let errors = dto.validate().unwrap_err();
        assert!(errors.contains(&PointFieldError::EmailInvalid));
        assert!(errors.contains(&PointFieldError::ItemsDuplicated));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let dto = CreatePointDto {
            latitude: 91.0,
            ..valid_dto()
        };
        assert_eq!(dto.validate(), Err(vec![PointFieldError::PositionOutOfRange]));
    }

    #[test]
    fn payload_serializes_items_as_integers() {
        let value = serde_json::to_value(valid_dto()).unwrap();
        assert_eq!(value["items"], serde_json::json!([1, 2]));
        assert_eq!(value["latitude"], serde_json::json!(-23.5));
        assert_eq!(value["uf"], serde_json::json!("SP"));
    }

    #[test]
    fn filter_parses_item_list() {
        let filter = PointFilter {
            items: Some("1, 2,,5".into()),
            ..Default::default()
        };
        assert_eq!(
            filter.item_ids(),
            Ok(vec![RecyclingItemId(1), RecyclingItemId(2), RecyclingItemId(5)])
        );

        let bad = PointFilter {
            items: Some("1,x".into()),
            ..Default::default()
        };
        assert!(bad.item_ids().is_err());
        assert_eq!(PointFilter::default().item_ids(), Ok(vec![]));
    }

    #[test]
    fn error_response_tolerates_missing_fields() {
        let parsed: ErrorResponse = serde_json::from_str(r#"{"error":"boom"}"#).unwrap();
        assert!(parsed.fields.is_empty());
    }
}
