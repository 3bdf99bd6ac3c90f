//! Database module - MySQL verification store using SQLx

pub mod connection;
pub mod mysql;

pub use connection::{create_pool, create_pool_from_env};
pub use mysql::MySqlVerificationRepository;
