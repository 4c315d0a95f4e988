//! Desktop client pages and application state.

pub mod analytics_pages;
pub mod app;
pub mod components;
pub mod dashboard;
pub mod employee_pages;
pub mod forms;
pub mod list_page;

pub use app::App;
