//! These traits define what the application needs from the outside world.

pub mod clock;
pub mod crypto;
pub mod store;

pub use clock::*;
pub use crypto::*;
pub use store::*;
