//! HTTP routes for the staff web form.
//!
//! Every page except `/login` and `/health` requires a session. Pages
//! redirect anonymous visitors to `/login`; the JSON endpoint answers 401.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use proposal_generator::metadata::parse_metadata;
use proposal_generator::scaffold::safe_project_name;
use proposal_generator::{generate_proposal, ProposalError};

use crate::config::WebConfig;
use crate::form::{build_metadata, ProposalForm};
use crate::pages;
use crate::session::{clear_cookie, session_cookie, session_id, Session, SessionStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<WebConfig>,
    /// Live sessions.
    pub sessions: Arc<SessionStore>,
    /// Shared staff access code; sign-in is refused when unset.
    pub access_code: Option<String>,
}

impl AppState {
    /// Build state from configuration and the access code.
    pub fn new(config: WebConfig, access_code: Option<String>) -> Self {
        let sessions = SessionStore::new(config.session_ttl_mins);
        Self {
            config: Arc::new(config),
            sessions: Arc::new(sessions),
            access_code: access_code.filter(|code| !code.trim().is_empty()),
        }
    }

    async fn current_session(&self, headers: &HeaderMap) -> Option<Session> {
        if let Some(id) = session_id(headers) {
            if let Some(session) = self.sessions.get(id).await {
                return Some(session);
            }
        }
        self.config.dev_auto_login.then(|| dev_session(&self.config))
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("access_code", &self.access_code.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

fn dev_session(config: &WebConfig) -> Session {
    let domain = config
        .allowed_domains
        .first()
        .map_or("localhost", String::as_str);
    Session {
        email: format!("dev@{domain}"),
        name: "Development User".to_owned(),
        expires_at: Utc::now(),
    }
}

/// Build the router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/login", get(login_form).post(login))
        .route("/logout", get(logout))
        .route("/dashboard", get(dashboard))
        .route("/create", get(create_form).post(create))
        .route("/api/generate", post(api_generate))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if state.current_session(&headers).await.is_some() {
        Redirect::to("/dashboard")
    } else {
        Redirect::to("/login")
    }
}

async fn login_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.current_session(&headers).await.is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    Html(pages::login_page(&state.config.branding.company_name, None)).into_response()
}

/// Sign-in form body.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    /// Staff email.
    #[serde(default)]
    pub email: String,
    /// Shared access code.
    #[serde(default)]
    pub access_code: String,
}

async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let email = form.email.trim();
    let company = &state.config.branding.company_name;

    if !state.config.is_allowed_email(email) {
        warn!(email, "sign-in refused: domain not allowed");
        let page = pages::login_page(company, Some("Please sign in with your company email."));
        return (StatusCode::FORBIDDEN, Html(page)).into_response();
    }

    let code_matches = state
        .access_code
        .as_deref()
        .is_some_and(|expected| expected == form.access_code.trim());
    if !code_matches {
        warn!(email, "sign-in refused: bad access code");
        let page = pages::login_page(company, Some("Invalid access code."));
        return (StatusCode::UNAUTHORIZED, Html(page)).into_response();
    }

    let id = state.sessions.create(email).await;
    info!(email, "staff signed in");
    (
        [(
            header::SET_COOKIE,
            session_cookie(id, state.sessions.ttl_secs()),
        )],
        Redirect::to("/dashboard"),
    )
        .into_response()
}

async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id(&headers) {
        state.sessions.remove(id).await;
    }
    ([(header::SET_COOKIE, clear_cookie())], Redirect::to("/login")).into_response()
}

async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    match state.current_session(&headers).await {
        Some(session) => Html(pages::dashboard_page(
            &state.config.branding.company_name,
            &session.name,
        ))
        .into_response(),
        None => Redirect::to("/login").into_response(),
    }
}

async fn create_form(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.current_session(&headers).await.is_none() {
        return Redirect::to("/login").into_response();
    }
    Html(pages::create_page(None)).into_response()
}

async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<ProposalForm>,
) -> Response {
    let Some(session) = state.current_session(&headers).await else {
        return Redirect::to("/login").into_response();
    };

    let today = chrono::Local::now().date_naive();
    let metadata = match build_metadata(&form, &state.config, today) {
        Ok(metadata) => metadata,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(pages::create_page(Some(&e.to_string()))),
            )
                .into_response();
        }
    };

    let document = match generate_proposal(&metadata, &state.config.branding) {
        Ok(document) => document,
        Err(e) => {
            warn!(error = %e, "proposal generation failed");
            let status = status_for(&e);
            return (
                status,
                Html(pages::error_page("Proposal generation failed", &e.to_string())),
            )
                .into_response();
        }
    };

    let client = metadata.client_name().unwrap_or_default();
    info!(user = %session.email, client, bytes = document.len(), "proposal generated");

    if form.wants_download() {
        let stem: String = safe_project_name(client)
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
            .collect();
        let filename = format!("{stem}_Proposal.html");
        (
            [
                (header::CONTENT_TYPE, "text/html; charset=utf-8".to_owned()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{filename}\""),
                ),
            ],
            document.into_html(),
        )
            .into_response()
    } else {
        Html(document.into_html()).into_response()
    }
}

async fn api_generate(State(state): State<AppState>, headers: HeaderMap, body: String) -> Response {
    if state.current_session(&headers).await.is_none() {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"success": false, "error": "authentication required"})),
        )
            .into_response();
    }

    let result = parse_metadata(&body)
        .and_then(|metadata| generate_proposal(&metadata, &state.config.branding));
    match result {
        Ok(document) => Json(json!({"success": true, "html": document.into_html()})).into_response(),
        Err(e) => {
            warn!(error = %e, "api generation failed");
            (
                status_for(&e),
                Json(json!({"success": false, "error": e.to_string()})),
            )
                .into_response()
        }
    }
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "ok", "version": env!("CARGO_PKG_VERSION")}))
}

/// Input problems are the caller's fault; anything else is ours.
fn status_for(err: &ProposalError) -> StatusCode {
    match err {
        ProposalError::MalformedInput(_) | ProposalError::MissingRequiredField { .. } => {
            StatusCode::BAD_REQUEST
        }
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
