pub mod app;
pub mod config;
pub mod net;
pub mod report;
pub mod tracker;

pub use config::{Config, ConfigError};
pub use net::{HttpScoreStore, ScoreStore};
pub use tracker::Tracker;
