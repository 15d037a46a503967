pub mod action;
pub mod app;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod mail;
pub mod menu;
pub mod report;
pub mod scheduler;
pub mod system;
