use anyhow::Result;
use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{add_extension::AddExtensionLayer, trace::TraceLayer};

use crate::config::IrisSettings;
use crate::db;
use crate::iris::handlers;
use crate::iris::model::SpeciesPredictor;

/// Everything a request handler of the iris app needs.
#[derive(Debug)]
pub struct State {
    pub db: DatabaseConnection,
    pub predictor: SpeciesPredictor,
}

impl State {
    pub fn new(db: DatabaseConnection, predictor: SpeciesPredictor) -> Self {
        Self { db, predictor }
    }

    /// Attempt to create a new State instance.
    ///
    /// The model is loaded first so that a missing or broken artifact aborts startup before
    /// anything else happens.
    pub async fn try_new(settings: &IrisSettings) -> Result<State> {
        let predictor = SpeciesPredictor::load(&settings.model_path)?;
        let db = db::connect(&settings.common.database_url).await?;
        db::prepare_iris(&db, settings.common.seed).await?;
        Ok(State::new(db, predictor))
    }
}

/// Build the router with all iris endpoints.
pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(handlers::index).post(handlers::submit_prediction))
        .route("/predict", get(handlers::predict))
        .route("/iris", get(handlers::iris_list))
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register),
        )
        .layer(AddExtensionLayer::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Run the server.
pub async fn run(settings: IrisSettings) -> Result<()> {
    let state = Arc::new(State::try_new(&settings).await?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(settings.common.addr).await?;
    tracing::info!("Iris app listening on {}", settings.common.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
