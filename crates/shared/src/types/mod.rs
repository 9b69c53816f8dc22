//! Common types used across the application.

pub mod id;
pub mod pagination;
pub mod party;

pub use id::*;
pub use pagination::{PageRequest, PageResponse};
pub use party::PartyRef;
