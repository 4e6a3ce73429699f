//! The paralympics event and region catalog.

pub mod handlers;
pub mod pages;
pub mod schemas;
pub mod server;
