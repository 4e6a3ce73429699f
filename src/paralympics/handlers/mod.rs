pub mod event;
pub mod pages;
pub mod region;
