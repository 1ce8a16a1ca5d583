//! Shop
//!
//! The application service the REST boundary talks to. It composes the goods catalog,
//! the carts store and the support collaborator.

pub mod data;
pub mod errors;
pub mod service;
pub mod support;

pub use errors::ShopServiceError;
pub use service::*;
pub use support::{MockSupportService, NoopSupportService, SupportService};
