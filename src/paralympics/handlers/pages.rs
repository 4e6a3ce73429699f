use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    response::Html,
};
use std::sync::Arc;

use crate::error::ServerError;
use crate::paralympics::handlers::event::{all_events, find_event};
use crate::paralympics::pages;
use crate::paralympics::server::State;

/// Handler for `GET /`
pub async fn index(state: Extension<Arc<State>>) -> Result<Html<String>, ServerError> {
    let events = all_events(&state.db).await?;
    Ok(Html(pages::index(&events)))
}

/// Handler for `GET /display_event/:id`
pub async fn display_event(
    state: Extension<Arc<State>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Html<String>, ServerError> {
    let Path(id) = id?;
    let event = find_event(&state.db, id).await?;
    Ok(Html(pages::event(&event)))
}
