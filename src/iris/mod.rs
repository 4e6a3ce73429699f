//! The iris species prediction app.

pub mod forms;
pub mod handlers;
pub mod model;
pub mod pages;
pub mod server;
