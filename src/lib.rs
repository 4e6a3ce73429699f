//! Two small web applications sharing one crate: an iris species predictor
//! and a paralympics event/region catalog.

mod constants;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod iris;
pub mod logging;
pub mod paralympics;
pub mod utils;
