//! Record Model domain logic.

pub mod record;
pub mod validate;
