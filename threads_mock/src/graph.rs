use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::GraphError,
    fixtures::{self, MEDIA_FIELDS, PROFILE_FIELDS},
    state::AppState,
};

const DEFAULT_PAGE_LIMIT: usize = 25;

#[derive(Deserialize, Debug)]
pub struct GraphQuery {
    access_token: Option<String>,
    fields: Option<String>,
    limit: Option<String>,
    after: Option<String>,
}

/// Looks up a node by id. `me` and user ids resolve to profiles, thread ids to media objects.
pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<GraphQuery>,
) -> Result<Json<Value>, GraphError> {
    let viewer = authenticate(&state, &query).await?;
    let fields = fixtures::parse_fields(query.fields.as_deref());

    let id = resolve_me(&id, &viewer);

    if let Some(user) = fixtures::find_user(id) {
        return fixtures::select_fields(user, "ThreadsUser", PROFILE_FIELDS, &fields).map(Json);
    }

    if let Some(thread) = fixtures::find_thread(id) {
        return fixtures::select_fields(thread, "ThreadsMedia", MEDIA_FIELDS, &fields).map(Json);
    }

    Err(GraphError::UnknownObject(id.to_owned()))
}

/// Lists a user's threads, oldest first. Cursors are thread ids.
pub async fn get_user_threads(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Query(query): Query<GraphQuery>,
) -> Result<Json<Value>, GraphError> {
    let viewer = authenticate(&state, &query).await?;
    let fields = fixtures::parse_fields(query.fields.as_deref());

    let id = resolve_me(&id, &viewer);
    let user = fixtures::find_user(id).ok_or_else(|| GraphError::UnknownObject(id.to_owned()))?;

    let limit = match query.limit.as_deref() {
        Some(limit) => limit
            .parse::<usize>()
            .map_err(|_| GraphError::InvalidParameter(format!("Invalid limit: {}", limit)))?,
        None => DEFAULT_PAGE_LIMIT,
    };

    let threads = fixtures::threads_owned_by(user.id).collect::<Vec<_>>();

    let start = match query.after.as_deref() {
        Some(after) => {
            threads
                .iter()
                .position(|thread| thread.id == after)
                .ok_or_else(|| GraphError::InvalidParameter(format!("Invalid cursor: {}", after)))?
                + 1
        }
        None => 0,
    };

    let page = threads.iter().skip(start).take(limit).copied().collect::<Vec<_>>();

    let data = page
        .iter()
        .map(|thread| fixtures::select_fields(*thread, "ThreadsMedia", MEDIA_FIELDS, &fields))
        .collect::<Result<Vec<_>, _>>()?;

    let cursors = match (page.first(), page.last()) {
        (Some(first), Some(last)) => json!({"before": first.id, "after": last.id}),
        _ => json!({}),
    };

    Ok(Json(json!({
        "data": data,
        "paging": {"cursors": cursors},
    })))
}

async fn authenticate(state: &AppState, query: &GraphQuery) -> Result<String, GraphError> {
    let token = query
        .access_token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or(GraphError::MissingToken)?;

    state
        .token_user(token)
        .await
        .ok_or(GraphError::InvalidToken)
}

fn resolve_me<'a>(id: &'a str, viewer: &'a str) -> &'a str {
    if id == "me" {
        viewer
    } else {
        id
    }
}
