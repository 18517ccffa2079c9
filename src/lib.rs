pub mod api;
pub mod config;
pub mod models;
pub mod poller;
pub mod scheduler;
pub mod sound;
pub mod ui;
