pub mod fetcher;
pub mod runner;
