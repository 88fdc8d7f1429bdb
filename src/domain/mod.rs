//! Domain layer - pure engagement and intelligence logic.

pub mod engagement;
pub mod foundation;
pub mod intelligence;
