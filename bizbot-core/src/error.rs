use thiserror::Error;

use crate::completion::CompletionError;

/// Errors raised while assembling the relay from configuration.
#[derive(Error, Debug)]
pub enum BizbotError {
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Completion error: {0}")]
    Completion(#[from] CompletionError),
}
