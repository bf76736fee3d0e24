//! Update Protocol domain logic.

pub mod countersign;
pub mod identity;
pub mod run;
pub mod transition;
