//! Goods

pub mod errors;
pub mod models;
mod repository;
pub mod service;

pub use errors::GoodsServiceError;
pub use service::*;
