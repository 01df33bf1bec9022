//! User identity: identifiers, emails, roles and the persisted entity.

pub mod email;
pub mod id;
pub mod role;
pub mod user;
