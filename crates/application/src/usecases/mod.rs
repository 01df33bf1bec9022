//! Application services implementing business logic.

pub mod users;

pub use users::*;
