use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};
use fimock_core::{Identity, SessionId, SessionIssue};
use tracing::info;
use uuid::Uuid;

use super::page::render_login_page;
use super::types::{LoginForm, LoginPageQuery};
use crate::{ApiForm, ErrorResponse, ServerState};

/// 302 redirect, matching what browsers expect after a form post
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Issue a new session and send the browser to its login page
pub async fn handle_root_redirect(State(state): State<ServerState>) -> Response {
    let SessionIssue { session_id, login_url } = state.login_urls.issue();
    info!("New session started: {}", session_id);
    found(&login_url)
}

/// Issue a new session and return it as JSON
pub async fn handle_generate_session(State(state): State<ServerState>) -> Json<SessionIssue> {
    let issue = state.login_urls.issue();
    info!("New session generated: {}", issue.session_id);
    Json(issue)
}

/// Render the mock login form
pub async fn handle_login_page(
    State(state): State<ServerState>,
    Query(query): Query<LoginPageQuery>,
) -> Result<Html<String>, ErrorResponse> {
    let session_id = query
        .session_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ErrorResponse::missing_field("sessionId is required".to_string()))?;

    Ok(Html(render_login_page(&session_id, state.allow_list.numbers())))
}

/// Bind the submitted phone number to the session, no verification
pub async fn handle_login(
    State(state): State<ServerState>,
    ApiForm(form): ApiForm<LoginForm>,
) -> Result<Response, ErrorResponse> {
    let request_id = Uuid::new_v4();

    let (session_id, phone_number) = form.required_fields().ok_or_else(|| {
        ErrorResponse::missing_field("sessionId and phoneNumber are required".to_string())
    })?;

    let session_id = SessionId::from(session_id);
    state.sessions.bind(&session_id, Identity::from(phone_number));
    info!("[{}] - [{}] POST /login bound {}", request_id, session_id, phone_number);

    let redirect = format!(
        "{}?sessionId={}",
        state.config.post_login_redirect.trim_end_matches('/'),
        urlencoding::encode(session_id.as_str())
    );
    Ok(found(&redirect))
}
