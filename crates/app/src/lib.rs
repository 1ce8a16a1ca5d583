//! Shop domain, persistence and application services shared by the binaries.

pub mod context;
pub mod database;
pub mod domain;
pub mod ids;

#[cfg(test)]
mod test;
