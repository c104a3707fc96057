use crate::shared::error::InternalErrorDetail;
use axum::{
    body::Body,
    extract::Request,
    http::header,
    middleware::Next,
    response::Response,
};

/// Development only: copies the internal cause of a 500 into the error body
/// as `detail`.
pub async fn expose_error_detail(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    let Some(InternalErrorDetail(detail)) = response.extensions().get::<InternalErrorDetail>().cloned()
    else {
        return response;
    };

    let (mut parts, body) = response.into_parts();
    let bytes = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Could not buffer error body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let body = match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(mut json) => {
            json["detail"] = serde_json::Value::String(detail);
            parts.headers.remove(header::CONTENT_LENGTH);
            Body::from(json.to_string())
        }
        Err(_) => Body::from(bytes),
    };

    Response::from_parts(parts, body)
}
