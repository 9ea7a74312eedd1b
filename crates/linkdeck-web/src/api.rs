//! Route handlers.
//!
//! Every `/api/*` handler first resolves the session cookie; an absent,
//! malformed, or expired token uniformly yields 401 with no further
//! detail. Mutating handlers run one load-mutate-persist cycle and return
//! the updated tree so the client can re-render without a second fetch.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{error, info, warn};

use linkdeck_session::{COOKIE_NAME, Claims, clear_cookie, read_cookie, session_cookie};
use linkdeck_store::{StoreError, TreePatch, reconcile};

use crate::frontend;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Session resolution
// ---------------------------------------------------------------------------

/// Resolve the session cookie into claims, or `None` for "no session".
fn session(state: &AppState, headers: &HeaderMap) -> Option<Claims> {
    let header = headers.get(header::COOKIE)?.to_str().ok()?;
    let token = read_cookie(header, COOKIE_NAME)?;
    state.sessions.verify(&token)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "Unauthorized" })),
    )
        .into_response()
}

/// Map a store error onto a JSON error response.
fn store_error(err: StoreError) -> Response {
    let (status, message) = match &err {
        StoreError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
        StoreError::Unauthorized => (StatusCode::FORBIDDEN, "incorrect password".to_string()),
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "not found".to_string()),
        _ => {
            error!(error = %err, "storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    };
    (status, Json(json!({ "error": message }))).into_response()
}

fn ok_with_tree(tree: &linkdeck_store::LinkTree) -> Response {
    (StatusCode::OK, Json(json!({ "ok": true, "data": tree }))).into_response()
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// GET / — login page, forced password change, or the dashboard.
pub async fn index(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    let Some(claims) = session(&state, &headers) else {
        return Html(frontend::LOGIN_HTML).into_response();
    };
    if claims.must_change {
        return Html(frontend::CHANGE_PASSWORD_HTML).into_response();
    }

    match state.links.load().await {
        Ok(tree) => Html(frontend::render_dashboard(&tree)).into_response(),
        Err(e) => store_error(e),
    }
}

// ---------------------------------------------------------------------------
// Login / logout
// ---------------------------------------------------------------------------

/// Login form fields.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub pass: String,
}

/// POST /login — verify credentials and set the session cookie.
pub async fn login(State(state): State<Arc<AppState>>, Form(form): Form<LoginForm>) -> Response {
    let record = match state.credentials.load().await {
        Ok(record) => record,
        Err(e) => return store_error(e),
    };

    if form.user != record.username || !record.password_matches(&form.pass) {
        warn!(user = %form.user, "login rejected");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "invalid username or password" })),
        )
            .into_response();
    }

    let token = match state.sessions.mint(&record.username, record.must_change()) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "failed to mint session token");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    info!(user = %record.username, must_change = record.must_change(), "login accepted");
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, session_cookie(&token)),
        ],
    )
        .into_response()
}

/// GET /logout — clear the session cookie and bounce to the login page.
pub async fn logout() -> Response {
    (
        StatusCode::FOUND,
        [
            (header::LOCATION, "/".to_string()),
            (header::SET_COOKIE, clear_cookie()),
        ],
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// POST /api/change-password
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ChangePasswordBody {
    #[serde(rename = "oldPass", default)]
    pub old_pass: String,
    #[serde(rename = "newPass", default)]
    pub new_pass: String,
}

/// Change the operator's password and re-mint a session without the
/// must-change flag.
pub async fn change_password(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<ChangePasswordBody>,
) -> Response {
    let Some(claims) = session(&state, &headers) else {
        return unauthorized();
    };

    let record = match state
        .credentials
        .change_password(&body.old_pass, &body.new_pass)
        .await
    {
        Ok(record) => record,
        Err(e) => return store_error(e),
    };
    debug_assert_eq!(claims.user, record.username);

    let token = match state.sessions.mint(&record.username, false) {
        Ok(token) => token,
        Err(e) => {
            error!(error = %e, "failed to mint session token");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    (
        StatusCode::OK,
        [(header::SET_COOKIE, session_cookie(&token))],
        Json(json!({ "ok": true })),
    )
        .into_response()
}

// ---------------------------------------------------------------------------
// /api/links
// ---------------------------------------------------------------------------

/// GET /api/links — the normalized tree.
pub async fn get_links(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if session(&state, &headers).is_none() {
        return unauthorized();
    }
    match state.links.load().await {
        Ok(tree) => (StatusCode::OK, Json(json!(tree))).into_response(),
        Err(e) => store_error(e),
    }
}

#[derive(Deserialize)]
pub struct CreateLinkBody {
    #[serde(rename = "categoryId", default)]
    pub category_id: String,
    #[serde(rename = "categoryName", default)]
    pub category_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
}

/// POST /api/links — add a link, creating the named category if needed.
pub async fn create_link(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<CreateLinkBody>,
) -> Response {
    if session(&state, &headers).is_none() {
        return unauthorized();
    }

    let mut tree = match state.links.load().await {
        Ok(tree) => tree,
        Err(e) => return store_error(e),
    };
    if let Err(e) = tree.create_link(
        &body.category_id,
        body.category_name.trim(),
        &body.title,
        &body.url,
        &body.icon,
    ) {
        return store_error(e);
    }
    if let Err(e) = state.links.persist(&tree).await {
        return store_error(e);
    }
    ok_with_tree(&tree)
}

#[derive(Deserialize)]
pub struct UpdateLinkBody {
    #[serde(rename = "linkId", default)]
    pub link_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: String,
    #[serde(rename = "moveToCategoryId", default)]
    pub move_to_category_id: String,
}

/// PUT /api/links — edit a link's fields, optionally moving it.
pub async fn update_link(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<UpdateLinkBody>,
) -> Response {
    if session(&state, &headers).is_none() {
        return unauthorized();
    }
    if body.link_id.is_empty() {
        return store_error(StoreError::Validation("linkId required".into()));
    }

    let mut tree = match state.links.load().await {
        Ok(tree) => tree,
        Err(e) => return store_error(e),
    };
    if let Err(e) = tree.update_link(
        &body.link_id,
        &body.title,
        &body.url,
        &body.icon,
        &body.move_to_category_id,
    ) {
        return store_error(e);
    }
    if let Err(e) = state.links.persist(&tree).await {
        return store_error(e);
    }
    ok_with_tree(&tree)
}

#[derive(Deserialize)]
pub struct DeleteLinkBody {
    #[serde(rename = "linkId", default)]
    pub link_id: String,
}

/// DELETE /api/links — remove a link.
pub async fn delete_link(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<DeleteLinkBody>,
) -> Response {
    if session(&state, &headers).is_none() {
        return unauthorized();
    }
    if body.link_id.is_empty() {
        return store_error(StoreError::Validation("linkId required".into()));
    }

    let mut tree = match state.links.load().await {
        Ok(tree) => tree,
        Err(e) => return store_error(e),
    };
    if let Err(e) = tree.delete_link(&body.link_id) {
        return store_error(e);
    }
    if let Err(e) = state.links.persist(&tree).await {
        return store_error(e);
    }
    ok_with_tree(&tree)
}

// ---------------------------------------------------------------------------
// POST /api/reorder
// ---------------------------------------------------------------------------

/// Reconcile a client-submitted ordering against the stored tree.
///
/// The patch arrives under a `data` wrapper. The body is taken as a raw
/// JSON value so a missing or malformed `data.categories` maps to the
/// same 400 shape as the other validation failures, not an extractor
/// rejection.
pub async fn reorder(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if session(&state, &headers).is_none() {
        return unauthorized();
    }

    let data = body.get("data").cloned().unwrap_or(Value::Null);
    let patch: TreePatch = match serde_json::from_value(data) {
        Ok(patch) => patch,
        Err(_) => {
            return store_error(StoreError::Validation("data.categories required".into()));
        }
    };

    let stored = match state.links.load().await {
        Ok(tree) => tree,
        Err(e) => return store_error(e),
    };
    let next = reconcile(&stored, &patch);
    if let Err(e) = state.links.persist(&next).await {
        return store_error(e);
    }
    ok_with_tree(&next)
}

// ---------------------------------------------------------------------------
// POST /api/categories/rename
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct RenameCategoryBody {
    #[serde(rename = "categoryId", default)]
    pub category_id: String,
    #[serde(rename = "newName", default)]
    pub new_name: String,
}

/// Rename a category.
pub async fn rename_category(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<RenameCategoryBody>,
) -> Response {
    if session(&state, &headers).is_none() {
        return unauthorized();
    }
    if body.category_id.is_empty() || body.new_name.trim().is_empty() {
        return store_error(StoreError::Validation("categoryId/newName required".into()));
    }

    let mut tree = match state.links.load().await {
        Ok(tree) => tree,
        Err(e) => return store_error(e),
    };
    if let Err(e) = tree.rename_category(&body.category_id, &body.new_name) {
        return store_error(e);
    }
    if let Err(e) = state.links.persist(&tree).await {
        return store_error(e);
    }
    ok_with_tree(&tree)
}
