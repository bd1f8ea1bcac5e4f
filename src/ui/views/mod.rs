pub mod action;
pub mod config;
pub mod deploy;
pub mod uploads;
