//! PostgreSQL persistence adapter.

pub mod models;
pub mod user_repository;

pub use user_repository::PgUserStore;
