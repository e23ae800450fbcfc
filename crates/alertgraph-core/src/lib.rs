pub mod config;
pub mod error;
pub mod filter;
pub mod query;
pub mod traits;
pub mod types;

pub use config::{
    ConfigManager, DataConfig, LoggingConfig, SecurityConfig, ServerConfig, Settings,
};
pub use error::*;
pub use filter::*;
pub use query::*;
pub use traits::*;
pub use types::*;
