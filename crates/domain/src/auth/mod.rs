//! Authentication material: passwords and verified caller claims.

pub mod claims;
pub mod password;
