pub mod actions;
pub mod schedule;
pub mod show;
