use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    http::StatusCode,
    Json,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder};
use std::sync::Arc;

use crate::error::ServerError;
use crate::handlers::ValidatedJson;
use crate::paralympics::schemas::{EventChanges, NewEvent};
use crate::paralympics::server::State;
use entity::{event, region};

/// All events, oldest first.
pub(crate) async fn all_events(db: &DatabaseConnection) -> Result<Vec<event::Model>, ServerError> {
    Ok(event::Entity::find()
        .order_by_asc(event::Column::Year)
        .order_by_asc(event::Column::EventId)
        .all(db)
        .await?)
}

pub(crate) async fn find_event(db: &DatabaseConnection, id: i32) -> Result<event::Model, ServerError> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(ServerError::NotFound)
}

/// Events must point at an existing region.
async fn ensure_region(db: &DatabaseConnection, noc: &str) -> Result<(), ServerError> {
    match region::Entity::find_by_id(noc.to_owned()).one(db).await? {
        Some(_) => Ok(()),
        None => Err(ServerError::BadRequest(format!("Unknown NOC {}", noc))),
    }
}

/// Handler for `GET /event`
pub async fn list_events(
    state: Extension<Arc<State>>,
) -> Result<Json<Vec<event::Model>>, ServerError> {
    Ok(Json(all_events(&state.db).await?))
}

/// Handler for `GET /event/:id`
pub async fn get_event(
    state: Extension<Arc<State>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<event::Model>, ServerError> {
    let Path(id) = id?;
    Ok(Json(find_event(&state.db, id).await?))
}

/// Handler for `POST /event`
pub async fn create_event(
    state: Extension<Arc<State>>,
    ValidatedJson(input): ValidatedJson<NewEvent>,
) -> Result<(StatusCode, Json<event::Model>), ServerError> {
    ensure_region(&state.db, &input.noc).await?;

    let model = input.into_active_model().insert(&state.db).await?;
    tracing::info!(
        "Created event {} ({} {})",
        model.event_id,
        model.location,
        model.year
    );
    Ok((StatusCode::CREATED, Json(model)))
}

/// Handler for `PATCH /event/:id`
pub async fn update_event(
    state: Extension<Arc<State>>,
    id: Result<Path<i32>, PathRejection>,
    ValidatedJson(changes): ValidatedJson<EventChanges>,
) -> Result<Json<event::Model>, ServerError> {
    let Path(id) = id?;
    let existing = find_event(&state.db, id).await?;
    if let Some(noc) = &changes.noc {
        ensure_region(&state.db, noc).await?;
    }

    let mut model = existing.clone().into_active_model();
    changes.apply(&mut model);
    if !model.is_changed() {
        return Ok(Json(existing));
    }
    let updated = model.update(&state.db).await?;
    tracing::info!("Updated event {}", updated.event_id);
    Ok(Json(updated))
}
