use axum::{
    extract::{rejection::FormRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use tracing::error;

/// Error response structure for HTTP errors
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: String, error_type: String, code: Option<String>) -> Self {
        Self {
            error: ErrorDetail {
                message,
                r#type: error_type,
                code,
            },
        }
    }

    pub fn not_found(message: String) -> Self {
        Self::new(message, "not_found".to_string(), None)
    }

    pub fn invalid_request(message: String) -> Self {
        Self::new(message, "invalid_request".to_string(), None)
    }

    pub fn missing_field(message: String) -> Self {
        Self::new(message, "invalid_request".to_string(), Some("missing_field".to_string()))
    }

    pub fn status(&self) -> StatusCode {
        match self.error.r#type.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "invalid_request" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}

/// Form extractor that returns our ErrorResponse on decoding failures
#[derive(FromRequest)]
#[from_request(via(axum::Form), rejection(ErrorResponse))]
pub struct ApiForm<T>(pub T);

impl From<FormRejection> for ErrorResponse {
    fn from(rejection: FormRejection) -> Self {
        let message = rejection.body_text();
        error!("Form decoding error: {}", message);
        ErrorResponse::invalid_request(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_follows_error_type() {
        assert_eq!(ErrorResponse::invalid_request("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::missing_field("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorResponse::not_found("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorResponse::new("x".into(), "io".into(), None).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn code_is_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::invalid_request("bad".into())).unwrap();
        assert_eq!(json["error"]["message"], "bad");
        assert_eq!(json["error"]["type"], "invalid_request");
        assert!(json["error"].get("code").is_none());
    }
}
