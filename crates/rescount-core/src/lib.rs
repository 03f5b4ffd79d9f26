pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod report;
pub mod resolution;
pub mod tally;
