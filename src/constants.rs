//! Constants

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Three upper case letters, e.g. `GBR`
    pub(crate) static ref RE_NOC: Regex = Regex::new(r"^[A-Z]{3}$").unwrap();
}

// iris app
pub(crate) const IRIS_ENV_PREFIX: &str = "IRIS";
pub(crate) const IRIS_DEFAULT_ADDR: &str = "127.0.0.1:5000";
pub(crate) const IRIS_DEFAULT_DATABASE_URL: &str = "sqlite://data/iris.db?mode=rwc";
pub(crate) const IRIS_DEFAULT_MODEL_PATH: &str = "data/model_lr.json";

// paralympics app
pub(crate) const PARALYMPICS_ENV_PREFIX: &str = "PARALYMPICS";
pub(crate) const PARALYMPICS_DEFAULT_ADDR: &str = "127.0.0.1:5001";
pub(crate) const PARALYMPICS_DEFAULT_DATABASE_URL: &str = "sqlite://data/paralympics.db?mode=rwc";

pub(crate) const DEFAULT_LOG_FILTER: &str = "iris_paralympics=info,tower_http=info";
