//! Layered application configuration: built-in defaults, an optional TOML file,
//! `--set KEY=VALUE` overrides, then explicit command-line flags.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
