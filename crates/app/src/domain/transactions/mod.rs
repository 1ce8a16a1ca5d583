//! Transactions

pub mod models;
