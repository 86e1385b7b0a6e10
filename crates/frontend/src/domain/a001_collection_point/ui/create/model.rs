use contracts::domain::a001_collection_point::aggregate::{
    CollectionPointId, CreatePointDto, CreatePointResponse, ErrorResponse,
};
use contracts::domain::a002_recycling_item::aggregate::RecyclingItem;
use gloo_net::http::Request;

use crate::shared::api_utils::{api_url, get_json};
use crate::shared::errors::{FetchError, SubmissionError};

/// GET /api/items
pub async fn fetch_items() -> Result<Vec<RecyclingItem>, FetchError> {
    get_json(&api_url("/api/items")).await
}

/// POST /api/points
pub async fn create_point(dto: &CreatePointDto) -> Result<CollectionPointId, SubmissionError> {
    let response = Request::post(&api_url("/api/points"))
        .json(dto)
        .map_err(|e| SubmissionError::Network(format!("Failed to serialize request: {}", e)))?
        .send()
        .await
        .map_err(|e| SubmissionError::Network(e.to_string()))?;

    let status = response.status();
    if response.ok() {
        let body: CreatePointResponse = response
            .json()
            .await
            .map_err(|e| SubmissionError::Server(status, format!("Failed to parse response: {}", e)))?;
        return Ok(body.id);
    }

    let text = response.text().await.unwrap_or_default();
    Err(classify_failure(status, &text))
}

/// Разбор ответа с ошибкой: 400/422 с перечнем полей считаем ошибкой валидации
fn classify_failure(status: u16, body: &str) -> SubmissionError {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(parsed) if matches!(status, 400 | 422) && !parsed.fields.is_empty() => {
            SubmissionError::Validation(parsed.fields.into_iter().map(|f| f.message).collect())
        }
        Ok(parsed) if matches!(status, 400 | 422) => SubmissionError::Validation(vec![parsed.error]),
        Ok(parsed) => SubmissionError::Server(status, parsed.error),
        Err(_) => SubmissionError::Server(status, body.to_string()),
    }
}
