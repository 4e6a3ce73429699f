//! Database connection, table creation and fixture seeding.

use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Schema,
    Set,
};
use serde::Deserialize;

use entity::{event, iris, region};

const IRIS_SEED: &str = include_str!("../data/iris_seed.json");
const PARALYMPICS_SEED: &str = include_str!("../data/paralympics_seed.json");

/// Open a connection pool to `database_url`.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;
    tracing::info!("Connected to {}", database_url);
    Ok(db)
}

/// Create the table for `entity` unless it already exists.
async fn create_table<E>(db: &DatabaseConnection, entity: E) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);
    let stmt = schema
        .create_table_from_entity(entity)
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&stmt)).await?;
    Ok(())
}

/// Create the iris app tables and, if `seed` is set and the iris table is empty, fill it.
pub async fn prepare_iris(db: &DatabaseConnection, seed: bool) -> Result<(), DbErr> {
    create_table(db, entity::iris::Entity).await?;
    create_table(db, entity::user_account::Entity).await?;

    if seed && iris::Entity::find().count(db).await? == 0 {
        let rows: Vec<iris::Model> = parse_seed(IRIS_SEED)?;
        let count = rows.len();
        // let the database assign rowids
        let models = rows.into_iter().map(|row| iris::ActiveModel {
            sepal_length: Set(row.sepal_length),
            sepal_width: Set(row.sepal_width),
            petal_length: Set(row.petal_length),
            petal_width: Set(row.petal_width),
            species: Set(row.species),
            ..Default::default()
        });
        iris::Entity::insert_many(models).exec(db).await?;
        tracing::info!("Seeded {} iris rows", count);
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ParalympicsSeed {
    regions: Vec<region::Model>,
    events: Vec<event::Model>,
}

/// Create the paralympics tables and, if `seed` is set and they are empty, fill them.
///
/// Regions are created (and seeded) before events so the foreign key holds.
pub async fn prepare_paralympics(db: &DatabaseConnection, seed: bool) -> Result<(), DbErr> {
    create_table(db, entity::region::Entity).await?;
    create_table(db, entity::event::Entity).await?;

    if !seed {
        return Ok(());
    }

    let ParalympicsSeed { regions, events } = parse_seed(PARALYMPICS_SEED)?;

    if region::Entity::find().count(db).await? == 0 {
        let count = regions.len();
        region::Entity::insert_many(regions.into_iter().map(region::ActiveModel::from))
            .exec(db)
            .await?;
        tracing::info!("Seeded {} regions", count);
    }

    if event::Entity::find().count(db).await? == 0 {
        let count = events.len();
        let models = events.into_iter().map(|ev| {
            let mut model = event::ActiveModel::from(ev);
            model.event_id = sea_orm::ActiveValue::NotSet;
            model
        });
        event::Entity::insert_many(models).exec(db).await?;
        tracing::info!("Seeded {} events", count);
    }
    Ok(())
}

fn parse_seed<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T, DbErr> {
    serde_json::from_str(raw).map_err(|e| DbErr::Custom(format!("invalid seed fixture: {}", e)))
}
