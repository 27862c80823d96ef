pub mod api;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod pagination;
pub mod store;
pub mod ui;

pub use error::{AppError, Result};
