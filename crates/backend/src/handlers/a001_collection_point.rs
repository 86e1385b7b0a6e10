use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::a001_collection_point::service::{self, PointServiceError};
use crate::shared::{config, data::db::get_connection};
use contracts::domain::a001_collection_point::aggregate::{
    CollectionPoint, CollectionPointId, CreatePointDto, CreatePointResponse, ErrorResponse,
    FieldErrorDto, PointDetailsResponse, PointFilter,
};
use contracts::domain::common::AggregateId;

impl IntoResponse for PointServiceError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            PointServiceError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "validation failed".into(),
                    fields: errors.into_iter().map(FieldErrorDto::from).collect(),
                },
            ),
            PointServiceError::UnknownItems(ids) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: "validation failed".into(),
                    fields: vec![FieldErrorDto {
                        field: "items".into(),
                        message: format!("Itens desconhecidos: {:?}", ids),
                    }],
                },
            ),
            PointServiceError::BadFilter(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: message,
                    fields: Vec::new(),
                },
            ),
            PointServiceError::Storage(e) => {
                tracing::error!("Collection point storage error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "internal error".into(),
                        fields: Vec::new(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

/// POST /api/points
pub async fn create(
    Json(dto): Json<CreatePointDto>,
) -> Result<(StatusCode, Json<CreatePointResponse>), PointServiceError> {
    let id = service::create(get_connection(), dto).await?;
    Ok((StatusCode::CREATED, Json(CreatePointResponse { id })))
}

/// GET /api/points/:id
pub async fn get_by_id(Path(id): Path<String>) -> Result<Json<PointDetailsResponse>, Response> {
    let id = CollectionPointId::from_string(&id).map_err(|message| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: message,
                fields: Vec::new(),
            }),
        )
            .into_response()
    })?;

    let public_url = &config::current().server.public_url;
    match service::get_details(get_connection(), id, public_url).await {
        Ok(Some(details)) => Ok(Json(details)),
        Ok(None) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Point not found".into(),
                fields: Vec::new(),
            }),
        )
            .into_response()),
        Err(e) => Err(e.into_response()),
    }
}

/// GET /api/points?city=&uf=&items=1,2
pub async fn list(
    Query(filter): Query<PointFilter>,
) -> Result<Json<Vec<CollectionPoint>>, PointServiceError> {
    let public_url = &config::current().server.public_url;
    let points = service::list(get_connection(), filter, public_url).await?;
    Ok(Json(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_collection_point::aggregate::PointFieldError;

    #[test]
    fn validation_errors_map_to_422_with_fields() {
        let response =
            PointServiceError::Validation(vec![PointFieldError::NameRequired]).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn storage_errors_map_to_500() {
        let response = PointServiceError::Storage(anyhow::anyhow!("disk full")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn bad_filter_maps_to_400() {
        let response = PointServiceError::BadFilter("bad".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
