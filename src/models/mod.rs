// Module exports for models

pub mod display;
pub mod holiday;
pub mod preferences;
