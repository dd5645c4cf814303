use thiserror::Error;

/// Unified error type for logo-intro
#[derive(Error, Debug)]
pub enum IntroError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Shape capacity exceeded: at most {capacity} vertices")]
    ShapeCapacity { capacity: usize },

    #[error("Unknown key name: \"{0}\"")]
    UnknownKey(String),
}

pub type IntroResult<T> = Result<T, IntroError>;
