use axum::{
    extract::Extension,
    http::StatusCode,
    response::Html,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use std::collections::HashMap;
use std::sync::Arc;
use validator::Validate;

use crate::error::ServerError;
use crate::handlers::{FormInput, ValidatedQuery};
use crate::iris::forms::{PredictionForm, PredictionQuery, UserForm};
use crate::iris::model::Measurements;
use crate::iris::pages::{self, FieldErrors};
use crate::iris::server::State;
use crate::utils::pass::hash_password;
use entity::{iris, user_account};

const DUPLICATE_EMAIL: &str = "A user with this email already exists.";

/// Handler for `GET /`
pub async fn index() -> Html<String> {
    Html(pages::index(&HashMap::new(), &FieldErrors::new(), None))
}

/// Handler for `POST /`
pub async fn submit_prediction(
    state: Extension<Arc<State>>,
    FormInput(input): FormInput<PredictionForm>,
) -> Result<(StatusCode, Html<String>), ServerError> {
    let values: HashMap<&str, String> = pages::MEASUREMENT_FIELDS
        .into_iter()
        .zip([
            input.sepal_length,
            input.sepal_width,
            input.petal_length,
            input.petal_width,
        ])
        .map(|(field, v)| (field, v.to_string()))
        .collect();

    if let Err(errors) = input.validate() {
        let html = pages::index(&values, &pages::field_errors(&errors), None);
        return Ok((StatusCode::BAD_REQUEST, Html(html)));
    }

    let species = state.predictor.predict(&Measurements::from(&input))?;
    let html = pages::index(&values, &FieldErrors::new(), Some(species.label()));
    Ok((StatusCode::OK, Html(html)))
}

/// Handler for `GET /predict`, returning the bare label.
pub async fn predict(
    state: Extension<Arc<State>>,
    ValidatedQuery(query): ValidatedQuery<PredictionQuery>,
) -> Result<String, ServerError> {
    let species = state.predictor.predict(&Measurements::from(&query))?;
    Ok(species.label().to_string())
}

/// Handler for `GET /iris`
pub async fn iris_list(state: Extension<Arc<State>>) -> Result<Html<String>, ServerError> {
    let rows = iris::Entity::find()
        .order_by_asc(iris::Column::Rowid)
        .all(&state.db)
        .await?;
    Ok(Html(pages::iris_list(&rows)))
}

/// Handler for `GET /register`
pub async fn register_form() -> Html<String> {
    Html(pages::register(None, &FieldErrors::new()))
}

/// Handler for `POST /register`
pub async fn register(
    state: Extension<Arc<State>>,
    FormInput(input): FormInput<UserForm>,
) -> Result<(StatusCode, Html<String>), ServerError> {
    if let Err(errors) = input.validate() {
        let html = pages::register(Some(&input.email), &pages::field_errors(&errors));
        return Ok((StatusCode::BAD_REQUEST, Html(html)));
    }

    // check if this email is already registered
    let conflict = user_account::Entity::find()
        .filter(user_account::Column::Email.eq(input.email.as_str()))
        .one(&state.db)
        .await?;
    if conflict.is_some() {
        return Err(ServerError::Conflict(DUPLICATE_EMAIL.into()));
    }

    let password = hash_password(&input.password).map_err(ServerError::Internal)?;
    let user = user_account::ActiveModel {
        email: Set(input.email),
        password: Set(password),
        ..Default::default()
    }
    .insert(&state.db)
    .await
    .map_err(|e| ServerError::conflict_on_duplicate(e, DUPLICATE_EMAIL))?;
    tracing::info!("Registered user {}", user.user_id);

    Ok((StatusCode::OK, Html(pages::registered(&user))))
}
