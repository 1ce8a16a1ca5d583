//! Payments

mod handlers;

pub(crate) use handlers::*;
