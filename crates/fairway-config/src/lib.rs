//! Configuration for the golf simulation.
//!
//! Settings persist to disk as a RON file, tolerate missing and unknown
//! fields, and can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AudioConfig, BallConfig, Config, DEFAULT_FIXED_HZ, DebugConfig, InputConfig, RestConfig,
    SimConfig, SwingConfig, default_config_dir,
};
pub use error::ConfigError;
