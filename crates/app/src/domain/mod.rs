//! UMKM Shop Domain

pub mod carts;
pub mod errors;
pub mod goods;
pub mod shop;
pub mod transactions;
