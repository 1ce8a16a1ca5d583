//! Goods

mod handlers;

pub(crate) use handlers::*;
