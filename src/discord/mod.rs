pub mod client;
pub mod format;
pub mod types;
