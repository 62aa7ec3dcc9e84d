// Service module exports

pub mod assets;
pub mod autostart;
pub mod holiday;
pub mod preferences;
pub mod timekeeper;
