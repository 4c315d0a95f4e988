pub mod api;
pub mod client;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod service;
pub mod store;
pub mod ui;

pub use error::{AppError, Result};
