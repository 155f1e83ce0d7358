pub mod login;

use crate::ErrorResponse;

/// Fallback for unknown routes
pub async fn handle_not_found() -> ErrorResponse {
    ErrorResponse::not_found("route not found".to_string())
}
