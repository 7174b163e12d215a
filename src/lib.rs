pub mod config;
pub mod connector;
pub mod executor;
pub mod state;
pub mod stream;

pub use self::config::{Config, ConfigError};
pub use self::state::SumAccumulator;
pub use self::stream::{Pipeline, RunningPipeline};
