pub mod config;
pub mod progress;
pub mod simulate;
pub mod view;
