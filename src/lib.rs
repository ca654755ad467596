pub mod app;
pub mod backend;
pub mod config;
pub mod display;
pub mod error;
pub mod nutrition;
pub mod search;
pub mod state;
