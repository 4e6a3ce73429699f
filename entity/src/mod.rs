//! Database entities shared by the iris and paralympics applications.
//!
//! Tables are created from these definitions at startup, so column names here
//! are the column names on disk.

pub mod event;
pub mod iris;
pub mod region;
pub mod user_account;
