use axum::{
    extract::{rejection::PathRejection, Extension, Path},
    http::StatusCode,
    Json,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ServerError;
use crate::handlers::ValidatedJson;
use crate::paralympics::schemas::{NewRegion, RegionChanges};
use crate::paralympics::server::State;
use entity::{event, region};

async fn find_region(state: &State, code: &str) -> Result<region::Model, ServerError> {
    region::Entity::find_by_id(code.to_owned())
        .one(&state.db)
        .await?
        .ok_or(ServerError::NotFound)
}

/// Handler for `GET /noc`
pub async fn list_regions(
    state: Extension<Arc<State>>,
) -> Result<Json<Vec<region::Model>>, ServerError> {
    let regions = region::Entity::find()
        .order_by_asc(region::Column::Noc)
        .all(&state.db)
        .await?;
    Ok(Json(regions))
}

/// Handler for `GET /noc/:code`
pub async fn get_region(
    state: Extension<Arc<State>>,
    code: Result<Path<String>, PathRejection>,
) -> Result<Json<region::Model>, ServerError> {
    let Path(code) = code?;
    Ok(Json(find_region(&state, &code).await?))
}

/// Handler for `POST /noc`
pub async fn create_region(
    state: Extension<Arc<State>>,
    ValidatedJson(input): ValidatedJson<NewRegion>,
) -> Result<(StatusCode, Json<region::Model>), ServerError> {
    let exists = region::Entity::find_by_id(input.noc.clone())
        .one(&state.db)
        .await?;
    let duplicate = format!("Region {} already exists", input.noc);
    if exists.is_some() {
        return Err(ServerError::Conflict(duplicate));
    }

    // a concurrent insert can still win the race between the check and here
    let model = input
        .into_active_model()
        .insert(&state.db)
        .await
        .map_err(|e| ServerError::conflict_on_duplicate(e, duplicate))?;
    tracing::info!("Created region {}", model.noc);
    Ok((StatusCode::CREATED, Json(model)))
}

/// Handler for `PATCH /noc/:code`
pub async fn update_region(
    state: Extension<Arc<State>>,
    code: Result<Path<String>, PathRejection>,
    ValidatedJson(changes): ValidatedJson<RegionChanges>,
) -> Result<Json<region::Model>, ServerError> {
    let Path(code) = code?;
    let existing = find_region(&state, &code).await?;
    let mut model = existing.clone().into_active_model();
    changes.apply(&mut model);
    if !model.is_changed() {
        return Ok(Json(existing));
    }
    let updated = model.update(&state.db).await?;
    tracing::info!("Updated region {}", updated.noc);
    Ok(Json(updated))
}

/// Handler for `DELETE /noc/:code`
pub async fn delete_region(
    state: Extension<Arc<State>>,
    code: Result<Path<String>, PathRejection>,
) -> Result<Json<Value>, ServerError> {
    let Path(code) = code?;
    let region = find_region(&state, &code).await?;

    let referencing = event::Entity::find()
        .filter(event::Column::Noc.eq(region.noc.as_str()))
        .count(&state.db)
        .await?;
    if referencing > 0 {
        return Err(ServerError::Conflict(format!(
            "Region {} is referenced by {} event(s)",
            region.noc, referencing
        )));
    }

    let noc = region.noc.clone();
    region.delete(&state.db).await?;
    tracing::info!("Deleted region {}", noc);
    Ok(Json(json!({ "Successfully deleted": noc })))
}
