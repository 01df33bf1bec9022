//! Storage backends implementing the user persistence port.

pub mod memory;
pub mod postgres;
