use anyhow::Result;
use axum::{
    routing::get,
    Router,
};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tower_http::{add_extension::AddExtensionLayer, trace::TraceLayer};

use crate::config::Settings;
use crate::db;
use crate::paralympics::handlers::{event, pages, region};

/// Everything a request handler of the paralympics app needs.
#[derive(Debug)]
pub struct State {
    pub db: DatabaseConnection,
}

impl State {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attempt to create a new State instance
    pub async fn try_new(settings: &Settings) -> Result<State> {
        let db = db::connect(&settings.database_url).await?;
        db::prepare_paralympics(&db, settings.seed).await?;
        Ok(State::new(db))
    }
}

/// Build the router with the pages and the JSON API.
pub fn router(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/display_event/:id", get(pages::display_event))
        .route("/noc", get(region::list_regions).post(region::create_region))
        .route(
            "/noc/:code",
            get(region::get_region)
                .patch(region::update_region)
                .delete(region::delete_region),
        )
        .route("/event", get(event::list_events).post(event::create_event))
        .route(
            "/event/:id",
            get(event::get_event).patch(event::update_event),
        )
        .layer(AddExtensionLayer::new(state))
        .layer(TraceLayer::new_for_http())
}

/// Run the server.
pub async fn run(settings: Settings) -> Result<()> {
    let state = Arc::new(State::try_new(&settings).await?);
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    tracing::info!("Paralympics app listening on {}", settings.addr);
    axum::serve(listener, app).await?;
    Ok(())
}
