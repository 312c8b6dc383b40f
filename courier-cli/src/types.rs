use rst_common::with_errors::thiserror::{self, Error};

pub const COURIER_DEFAULT_CONFIG: &str = "courier.toml";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("config error: {0}")]
    ConfigError(String),

    #[error("router error: {0}")]
    RouterError(String),

    #[error("json error: {0}")]
    JSONError(String),
}
