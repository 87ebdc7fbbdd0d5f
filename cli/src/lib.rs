pub mod commands;
pub mod discover;
pub mod pipeline;
