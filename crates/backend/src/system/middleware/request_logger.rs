use axum::body::Body;
use axum::http::{header, Request, Response as HttpResponse};
use axum::middleware::Next;
use axum::response::Response;

/// Middleware для логирования HTTP запросов
///
/// Пишет одну строку на запрос: длительность, размер ответа, статус, метод и путь.
/// Ответы с кодом >= 400 логируются как warn.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    let status = response.status().as_u16();
    let size = response_size(&response);
    let millis = start.elapsed().as_millis();

    if status >= 400 {
        tracing::warn!("{:>5}ms | {:>10} | {} {:>6} {}", millis, size, status, method, path);
    } else {
        tracing::info!("{:>5}ms | {:>10} | {} {:>6} {}", millis, size, status, method, path);
    }

    response
}

/// Размер тела из Content-Length, с разделителями тысяч
fn response_size<B>(response: &HttpResponse<B>) -> String {
    response
        .headers()
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok())
        .map(format_number)
        .unwrap_or_else(|| "-".to_string())
}

fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
