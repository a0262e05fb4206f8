pub mod chart;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod output;
pub mod scoring;
