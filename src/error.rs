use thiserror::Error;

/// Rejected simulation settings.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("field dimension {name} must be positive and finite, got {value}")]
    InvalidDimension { name: &'static str, value: f64 },

    #[error("field dimension {name} is {value}, the window limit is {max}")]
    FieldTooLarge {
        name: &'static str,
        value: f64,
        max: f64,
    },

    #[error("agent diameter {diameter} does not fit a {width}x{height} field")]
    AgentTooLarge {
        diameter: f64,
        width: f64,
        height: f64,
    },

    #[error("base speed must be positive and finite, got {0}")]
    InvalidSpeed(f64),
}

/// Failures that stop the program before the first frame.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to create window: {0}")]
    Window(String),
}

pub type AppResult<T> = Result<T, AppError>;
