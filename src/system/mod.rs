pub mod collector;
pub mod services;
pub mod snapshot;
