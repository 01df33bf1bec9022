//! These traits define what the application can do.

pub mod users;

pub use users::*;
