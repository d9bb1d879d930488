pub mod commands;
pub mod launcher;
pub mod platform;
