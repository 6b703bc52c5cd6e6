use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use url::Url;

use crate::{
    error::{AuthorizeError, GraphError},
    state::AppState,
};

pub const KNOWN_SCOPES: &[&str] = &[
    "threads_basic",
    "threads_content_publish",
    "threads_manage_insights",
    "threads_manage_replies",
    "threads_read_replies",
];

#[derive(Deserialize, Debug)]
pub struct AuthorizeQuery {
    client_id: Option<String>,
    redirect_uri: Option<String>,
    response_type: Option<String>,
    scope: Option<String>,
    state: Option<String>,
}

/// The authorization dialog. The configured user is always signed in and always grants access,
/// so a valid request is redirected straight back to the app with a fresh code.
pub async fn authorize(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AuthorizeQuery>,
) -> Result<Response, AuthorizeError> {
    let (client_id, mut redirect) = validate_authorize(&state, &query).map_err(|err| {
        info!(error = %err, "rejected authorization request");
        err
    })?;

    let code = state.issue_code(&client_id, state.config().get_redirect_uri()).await;
    debug!(%client_id, %code, "issued authorization code");

    {
        let mut pairs = redirect.query_pairs_mut();
        pairs.append_pair("code", &code);
        if let Some(csrf_state) = query.state.as_deref().filter(|s| !s.is_empty()) {
            pairs.append_pair("state", csrf_state);
        }
    }

    Ok((StatusCode::FOUND, [(header::LOCATION, redirect.to_string())]).into_response())
}

fn validate_authorize(
    state: &AppState,
    query: &AuthorizeQuery,
) -> Result<(String, Url), AuthorizeError> {
    let config = state.config();

    let client_id = non_empty(&query.client_id).ok_or(AuthorizeError::MissingParameter("client_id"))?;
    if client_id != config.get_client_id() {
        return Err(AuthorizeError::UnknownClient(client_id.to_owned()));
    }

    let redirect_uri =
        non_empty(&query.redirect_uri).ok_or(AuthorizeError::MissingParameter("redirect_uri"))?;
    if redirect_uri != config.get_redirect_uri() {
        return Err(AuthorizeError::RedirectUriMismatch);
    }
    let redirect = Url::parse(redirect_uri).map_err(|_| AuthorizeError::RedirectUriMismatch)?;

    let response_type = non_empty(&query.response_type)
        .ok_or(AuthorizeError::MissingParameter("response_type"))?;
    if response_type != "code" {
        return Err(AuthorizeError::UnsupportedResponseType(
            response_type.to_owned(),
        ));
    }

    let scope = non_empty(&query.scope).ok_or(AuthorizeError::MissingParameter("scope"))?;
    if let Some(unknown) = scope
        .split(',')
        .map(str::trim)
        .find(|scope| !KNOWN_SCOPES.contains(scope))
    {
        return Err(AuthorizeError::InvalidScope(unknown.to_owned()));
    }

    Ok((client_id.to_owned(), redirect))
}

#[derive(Deserialize, Debug)]
pub struct TokenForm {
    client_id: Option<String>,
    client_secret: Option<String>,
    grant_type: Option<String>,
    redirect_uri: Option<String>,
    code: Option<String>,
}

/// Exchanges an authorization code for an access token.
pub async fn access_token(
    State(state): State<Arc<AppState>>,
    Form(form): Form<TokenForm>,
) -> Result<Json<Value>, GraphError> {
    exchange(&state, &form).await.map_err(|err| {
        info!(error = %err, "rejected token exchange");
        err
    })
}

async fn exchange(state: &AppState, form: &TokenForm) -> Result<Json<Value>, GraphError> {
    let client_id = non_empty(&form.client_id).ok_or(GraphError::MissingParameter("client_id"))?;
    let client_secret =
        non_empty(&form.client_secret).ok_or(GraphError::MissingParameter("client_secret"))?;
    let grant_type =
        non_empty(&form.grant_type).ok_or(GraphError::MissingParameter("grant_type"))?;
    let redirect_uri =
        non_empty(&form.redirect_uri).ok_or(GraphError::MissingParameter("redirect_uri"))?;
    let code = non_empty(&form.code).ok_or(GraphError::MissingParameter("code"))?;

    if grant_type != "authorization_code" {
        return Err(GraphError::UnsupportedGrantType(grant_type.to_owned()));
    }

    let config = state.config();
    if client_id != config.get_client_id() || client_secret != config.get_client_secret() {
        return Err(GraphError::InvalidClient);
    }

    let user_id = state
        .redeem_code(code, client_id, redirect_uri)
        .await
        .ok_or(GraphError::InvalidCode)?;

    let token = state.issue_token(&user_id).await;
    debug!(%user_id, "issued access token");

    // The real API sends the user id as a JSON number here.
    let user_id = match user_id.parse::<u64>() {
        Ok(id) => Value::from(id),
        Err(_) => Value::from(user_id),
    };

    Ok(Json(json!({
        "access_token": token,
        "user_id": user_id,
    })))
}

fn non_empty(val: &Option<String>) -> Option<&str> {
    val.as_deref().filter(|val| !val.is_empty())
}
